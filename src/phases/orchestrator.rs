//! Orchestrator for a complete run
//!
//! Coordinates the phases behind two entry points: [`plan`] computes what a
//! run would do without touching anything, [`execute`] carries it out.

use super::{phase1, phase2, phase3, Outcome, Plan};
use crate::config::Config;
use crate::error::Result;
use crate::git::RevisionControl;
use crate::merge::StructuredMerge;
use crate::pipeline::PipelineControl;

/// Run Phases 1 and 2 up to aggregation.
pub fn plan(config: &Config, repo: &dyn RevisionControl) -> Result<Plan> {
    let (comparison, changes) = phase1::execute(repo, &config.base_revision, &config.head)?;
    let (fired, paths) = phase2::execute(&config.mapping, &changes, &config.shared_files);
    Ok(Plan {
        comparison,
        changes,
        fired,
        paths,
    })
}

/// Carry out an already computed plan: validate its paths, then merge or halt.
///
/// Validation comes first, so a missing fragment fails the run before the
/// merger or the pipeline are touched.
pub fn execute_plan(
    plan: &Plan,
    config: &Config,
    merger: &dyn StructuredMerge,
    pipeline: &dyn PipelineControl,
) -> Result<Outcome> {
    let sources = phase2::validate_paths(&config.repo_root, &plan.paths)?;
    phase3::execute(sources, &config.output_file(), merger, pipeline)
}

/// Execute the complete run.
///
/// 1. Resolve the comparison and enumerate changes
/// 2. Fire rules, aggregate and validate fragment paths
/// 3. Merge into [`Config::output_file`], or halt when nothing was selected
pub fn execute(
    config: &Config,
    repo: &dyn RevisionControl,
    merger: &dyn StructuredMerge,
    pipeline: &dyn PipelineControl,
) -> Result<Outcome> {
    let plan = plan(config, repo)?;
    execute_plan(&plan, config, merger, pipeline)
}
