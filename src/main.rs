//! # Path Filtering CLI
//!
//! This is the binary entry point for the `path-filtering` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments and environment using `clap`.
//! - Executing the selected command.
//! - Reporting failures and translating them into the exit code a CI step
//!   expects.
//!
//! The core logic lives in the `path_filtering` library crate; the binary is
//! a thin wrapper around it.

mod cli;
mod commands;

use clap::Parser;

use path_filtering::error::{Error, EXIT_FAILURE};

fn main() {
    let cli = cli::Cli::parse();
    if let Err(err) = cli.execute() {
        eprintln!("Error: {:#}", err);
        let code = err
            .downcast_ref::<Error>()
            .map(Error::exit_code)
            .unwrap_or(EXIT_FAILURE);
        std::process::exit(code);
    }
}
