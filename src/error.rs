//! # Error Handling
//!
//! This module defines the centralized error type for `path-filtering`. It
//! uses the `thiserror` library to describe every anticipated failure mode
//! with a clear message.
//!
//! ## Key Components
//!
//! - **`Error`**: the enum of everything that can go wrong while resolving
//!   revisions, evaluating the mapping, validating fragment paths, merging
//!   documents or signalling the pipeline.
//! - **`Result<T>`**: a type alias for `std::result::Result<T, Error>`.
//!
//! Every error is fatal for a run. [`Error::exit_code`] decides which process
//! exit status the binary reports for it, so that a failing external tool's
//! status is propagated and missing fragments keep their dedicated code.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code reported when one or more fragment files do not exist.
///
/// The unsigned rendition of `-1`, which is what a shell observes for
/// `exit(-1)`.
pub const EXIT_MISSING_FILES: i32 = 255;

/// Exit code reported for every failure without a more specific status.
pub const EXIT_FAILURE: i32 = 1;

/// Main error type for path-filtering operations
#[derive(Error, Debug)]
pub enum Error {
    /// The mapping or another configuration value could not be parsed.
    ///
    /// Includes the 1-based line of the mapping when the problem is tied to
    /// one rule.
    #[error("Configuration parsing error: {message}{}", line.map(|l| format!(" (mapping line {})", l)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Mapping line that caused the error, if applicable
        line: Option<usize>,
    },

    /// A git command could not be spawned or returned a non-zero status.
    #[error("Git command failed in {repo}: git {command} - {stderr}")]
    GitCommand {
        command: String,
        repo: String,
        stderr: String,
        /// Exit status of git, `None` when the process could not be started
        status: Option<i32>,
    },

    /// Base and head do not share any history.
    #[error("No merge base between {base} and {head}")]
    NoMergeBase { base: String, head: String },

    /// One or more aggregated fragment paths are not present on disk.
    #[error("The following files are not present: {}", display_paths(paths))]
    MissingFiles { paths: Vec<PathBuf> },

    /// An external tool (merge utility, halt command) failed.
    #[error("External command failed: {command}{} - {stderr}", status.map(|s| format!(" (exit status {})", s)).unwrap_or_default())]
    ToolCommand {
        command: String,
        stderr: String,
        /// Exit status of the tool, `None` when it could not be started or
        /// was killed by a signal
        status: Option<i32>,
    },

    /// Documents could not be deep-merged.
    #[error("Merge operation error: {source_file} - {message}")]
    Merge { source_file: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// The process exit code a CI step should report for this error.
    ///
    /// Missing fragments exit with [`EXIT_MISSING_FILES`], failing subprocesses
    /// propagate their own status when they have one, and anything else exits
    /// with [`EXIT_FAILURE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingFiles { .. } => EXIT_MISSING_FILES,
            Error::GitCommand {
                status: Some(code), ..
            }
            | Error::ToolCommand {
                status: Some(code), ..
            } if *code != 0 => *code,
            _ => EXIT_FAILURE,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
