//! # Plan Command Implementation
//!
//! Shows what `generate` would do: the revisions compared, the changed
//! paths, the rules they fire and the fragments that would be merged, with
//! any fragment missing on disk flagged. Nothing is merged or written and the
//! pipeline is never halted, which makes the command safe to run locally
//! while writing a mapping.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use path_filtering::git::Git;
use path_filtering::output::{Marker, OutputConfig};
use path_filtering::phases::{orchestrator, selection, Plan};

use super::SelectionArgs;

/// Output format of the plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    /// Human readable listing
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// Show the selection without merging
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
    pub format: PlanFormat,
}

/// Execute the `plan` command.
pub fn execute(args: PlanArgs, output: &OutputConfig) -> Result<()> {
    let config = args.selection.to_config(PathBuf::new())?;
    let repo = Git::new(&config.repo_root);
    let plan = orchestrator::plan(&config, &repo)?;
    let missing = selection::missing_paths(&config.repo_root, &plan.paths);

    match args.format {
        PlanFormat::Json => {
            let mut value = serde_json::to_value(&plan)?;
            value["missing"] = serde_json::to_value(&missing)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        PlanFormat::Text => print_text(&plan, &missing, output),
    }
    Ok(())
}

fn print_text(plan: &Plan, missing: &[PathBuf], output: &OutputConfig) {
    println!(
        "{} Comparing {}",
        output.marker(Marker::Compare),
        output.paint(Marker::Compare, &plan.comparison.to_string())
    );

    println!("\nChanged paths ({}):", plan.changes.len());
    for change in &plan.changes {
        println!("  {}", change);
    }

    println!("\nFired rules ({}):", plan.fired.len());
    for rule in &plan.fired {
        println!("  line {}: {}", rule.line, rule);
    }

    if plan.paths.is_empty() {
        println!(
            "\n{} Nothing to merge, the pipeline would be halted",
            output.marker(Marker::Halt)
        );
        return;
    }

    println!("\n{} Files to merge:", output.marker(Marker::Files));
    for path in &plan.paths {
        let absent = missing.iter().any(|m| m.as_os_str() == path.as_str());
        if absent {
            println!("  {} {}", path, output.paint(Marker::Error, "(missing)"));
        } else {
            println!("  {}", path);
        }
    }
}
