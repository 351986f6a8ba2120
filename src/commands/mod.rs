//! # CLI Command Implementations
//!
//! Each subcommand of the `path-filtering` tool lives in its own file with an
//! `Args` struct derived using `clap` and an `execute` function.
//!
//! Every input a CI job provides can be given as a flag or through the
//! environment variable named in its help text. [`SelectionArgs`] holds the
//! inputs shared by `generate` and `plan`.

pub mod completions;
pub mod generate;
pub mod plan;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use path_filtering::config::Config;

/// Inputs that decide which fragments are selected
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Head revision of the build
    #[arg(long = "head", value_name = "REV", env = "CIRCLE_SHA1")]
    pub head: String,

    /// Revision to compare head against
    #[arg(long, value_name = "REV", env = "BASE_REVISION")]
    pub base_revision: String,

    /// Mapping of path patterns to fragment files, one `pattern path...` rule per line
    #[arg(long, value_name = "RULES", env = "MAPPING")]
    pub mapping: String,

    /// Whitespace separated fragment files included whenever anything is merged
    #[arg(long, value_name = "FILES", env = "SHARED_FILES", default_value = "")]
    pub shared_files: String,

    /// Working tree to run git in; fragment paths and a relative output path resolve against it
    #[arg(long, value_name = "DIR", env = "REPO_PATH", default_value = ".")]
    pub repo: PathBuf,
}

impl SelectionArgs {
    /// Build the run configuration, writing merged output to `output_path`.
    pub fn to_config(&self, output_path: PathBuf) -> Result<Config> {
        let config = Config::new(
            output_path,
            &self.shared_files,
            self.head.as_str(),
            self.base_revision.as_str(),
            &self.mapping,
        )
        .context("Invalid configuration")?;
        Ok(config.with_repo_root(&self.repo))
    }
}
