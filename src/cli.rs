//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use path_filtering::output::OutputConfig;

/// Path Filtering - Build a CI configuration from the fragments matching changed paths
#[derive(Parser, Debug)]
#[command(name = "path-filtering")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the fragments selected by the changed paths, or halt the pipeline
    Generate(commands::generate::GenerateArgs),

    /// Show the comparison, changed paths and selected fragments without merging
    Plan(commands::plan::PlanArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Generate(args) => commands::generate::execute(args, &output),
            Commands::Plan(args) => commands::plan::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Fails only if a logger is already installed.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
