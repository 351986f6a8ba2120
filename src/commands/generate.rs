//! # Generate Command Implementation
//!
//! Runs the whole pipeline: compare head with the base revision, select the
//! fragments whose patterns match a changed path, then either merge them
//! into the output file or halt the CI job when nothing was selected.
//!
//! ## Exit codes
//!
//! - `0` when the configuration was written or the pipeline was halted
//! - `255` when a selected fragment does not exist
//! - the status of git, the merger or the halt command when one of them fails
//! - `1` for any other error

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use path_filtering::defaults::DEFAULT_HALT_COMMAND;
use path_filtering::error::Error;
use path_filtering::git::Git;
use path_filtering::merge::MergerKind;
use path_filtering::output::{Marker, OutputConfig};
use path_filtering::phases::{orchestrator, Outcome};
use path_filtering::pipeline::HaltCommand;

use super::SelectionArgs;

/// Merge the selected fragments or halt the pipeline
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// File the merged configuration is written to
    #[arg(long, value_name = "PATH", env = "OUTPUT_PATH")]
    pub output_path: PathBuf,

    /// Command run to halt the pipeline when no fragment is selected
    #[arg(long, value_name = "COMMAND", env = "HALT_COMMAND", default_value = DEFAULT_HALT_COMMAND)]
    pub halt_command: String,

    /// How fragments are merged
    #[arg(long, value_enum, env = "MERGER", default_value_t = MergerKind::Builtin)]
    pub merger: MergerKind,
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs, output: &OutputConfig) -> Result<()> {
    let config = args.selection.to_config(args.output_path)?;
    let pipeline = HaltCommand::parse(&args.halt_command)?;
    let merger = args.merger.build(&config.repo_root);
    let repo = Git::new(&config.repo_root);

    let plan = orchestrator::plan(&config, &repo)?;
    println!(
        "{} Comparing {}",
        output.marker(Marker::Compare),
        output.paint(Marker::Compare, &plan.comparison.to_string())
    );

    match orchestrator::execute_plan(&plan, &config, merger.as_ref(), &pipeline) {
        Ok(Outcome::Halted) => {
            println!(
                "{} No YAML files to merge, halted with '{}'",
                output.marker(Marker::Halt),
                pipeline.command_line()
            );
            Ok(())
        }
        Ok(Outcome::Merged {
            sources,
            output: written,
        }) => {
            println!("{} YAML files merged:", output.marker(Marker::Files));
            for source in &sources {
                println!("{}", source.display());
            }
            println!(
                "{} {}",
                output.marker(Marker::Done),
                output.paint(Marker::Done, &format!("Wrote {}", written.display()))
            );
            Ok(())
        }
        Err(Error::MissingFiles { paths }) => {
            println!(
                "{} {}",
                output.marker(Marker::Error),
                output.paint(Marker::Error, "The following files are not present:")
            );
            for path in &paths {
                println!("{}", path.display());
            }
            Err(Error::MissingFiles { paths }.into())
        }
        Err(err) => Err(err.into()),
    }
}
