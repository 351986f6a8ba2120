//! Structured merge of configuration fragments
//!
//! The pipeline only needs one thing from a merger: fold a list of YAML
//! files into a single document and hand back its text. That capability is
//! the [`StructuredMerge`] trait, with two implementations:
//!
//! - [`yaml::YamlDeepMerge`] - parses and merges in-process with `serde_yaml`.
//! - [`external::YqMerge`] - pipes the file list to `yq` through `xargs`, for
//!   pipelines that want the merge done by the same tool they already use.
//!
//! Both perform the same reduction: start from an empty mapping, merge
//! mappings recursively, and let later documents replace every other value.

pub mod external;
pub mod yaml;

use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::Result;

/// Folds fragment files into one document.
pub trait StructuredMerge {
    /// Merge `paths` in the given order and return the rendered document.
    fn merge(&self, paths: &[PathBuf]) -> Result<String>;
}

/// Which [`StructuredMerge`] implementation a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MergerKind {
    /// Merge in-process
    #[default]
    Builtin,
    /// Merge with the external `yq` command
    Yq,
}

impl MergerKind {
    /// Instantiate the merger, reading fragments relative to `root`.
    pub fn build(self, root: impl Into<PathBuf>) -> Box<dyn StructuredMerge> {
        match self {
            MergerKind::Builtin => Box::new(yaml::YamlDeepMerge::new(root)),
            MergerKind::Yq => Box::new(external::YqMerge::new(root)),
        }
    }
}
