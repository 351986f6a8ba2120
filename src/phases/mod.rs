//! The phases of a path-filtering run.
//!
//! ## Overview
//!
//! A run follows three phases:
//! 1. Discovery - resolve which commit to compare head against and list the
//!    paths that changed between them
//! 2. Selection - fire the mapping rules matching those paths, aggregate
//!    their fragments with the shared files and check they all exist
//! 3. Writing - merge the fragments into the output file, or halt the
//!    pipeline when there is nothing to merge
//!
//! [`orchestrator`] strings them together. Phases 1 and 2 together produce a
//! [`Plan`], which is also what the read-only `plan` command reports.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::MappingRule;

pub mod discovery;
pub mod orchestrator;
pub mod selection;
pub mod write;

pub use discovery as phase1;
pub use selection as phase2;
pub use write as phase3;

/// How the base side of a [`Comparison`] was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseSource {
    /// Merge base of the base revision and head.
    MergeBase,
    /// Head already contained the base revision; its first parent is used.
    FirstParent,
    /// Head is a root commit; everything it contains counts as changed.
    EmptyTree,
}

/// The pair of revisions whose difference is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub base: String,
    pub head: String,
    pub source: BaseSource,
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}...{}", self.base, self.head)
    }
}

/// Everything decided before any file is merged.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub comparison: Comparison,
    /// Changed paths, in the order git reported them.
    pub changes: Vec<String>,
    /// Rules that matched at least one changed path, in declaration order.
    pub fired: Vec<MappingRule>,
    /// Deduplicated fragment paths to merge, in merge order.
    pub paths: Vec<String>,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to merge; the pipeline was told to stop.
    Halted,
    /// The fragments were merged into `output`.
    Merged {
        sources: Vec<PathBuf>,
        output: PathBuf,
    },
}
