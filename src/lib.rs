//! # Path Filtering Library
//!
//! This library selects CI configuration fragments based on what changed in
//! a commit range and merges them into a single configuration file. It is
//! designed to be used by the `path-filtering` command-line tool inside a CI
//! job, but every external collaborator sits behind a trait so the logic can
//! be driven from other tools or tests.
//!
//! ## Quick Example
//!
//! ```
//! use path_filtering::config::parse_mapping;
//! use path_filtering::phases::selection::{aggregate_paths, fired_rules};
//!
//! let rules = parse_mapping("services/api/.* configs/api.yml").unwrap();
//! let changes = vec!["services/api/main.go".to_string()];
//!
//! let fired = fired_rules(&rules, &changes);
//! let paths = aggregate_paths(fired, &["base.yml".to_string()]);
//! assert_eq!(paths, vec!["base.yml", "configs/api.yml"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the mapping of path patterns to fragment
//!   files, the shared files and the revisions to compare.
//! - **Revision control (`git`)**: the [`git::RevisionControl`] trait and its
//!   `git` command line implementation.
//! - **Merging (`merge`)**: the [`merge::StructuredMerge`] trait, with an
//!   in-process YAML deep merge and a `yq` based one.
//! - **Pipeline control (`pipeline`)**: the [`pipeline::PipelineControl`]
//!   trait used to halt the CI job when nothing applies.
//! - **Phases (`phases`)**: discovery, selection and writing, coordinated by
//!   `phases::orchestrator`.
//!
//! ## Execution Flow
//!
//! 1.  **Discovery**: resolve base and head, pick the commit to compare
//!     against and list the changed paths.
//! 2.  **Selection**: fire matching rules, aggregate their fragments with the
//!     shared files and verify they exist.
//! 3.  **Writing**: merge the fragments into the output file, or halt the
//!     pipeline when nothing was selected.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod merge;
pub mod output;
pub mod phases;
pub mod pipeline;

#[cfg(test)]
mod selection_proptest;
