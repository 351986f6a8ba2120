//! Revision control access.
//!
//! The pipeline talks to version control through the [`RevisionControl`]
//! trait so tests can substitute a scripted history. [`Git`] is the
//! production implementation; it shells out to the system `git` binary,
//! which picks up whatever repository configuration the CI checkout has.

use std::path::PathBuf;
use std::process::{Command, Output};

use log::debug;

use crate::error::{Error, Result};

/// The revision-control operations needed to find what changed.
pub trait RevisionControl {
    /// Resolve a revision (branch, tag, sha, `HEAD~2`, ...) to a commit id.
    fn resolve_commit(&self, rev: &str) -> Result<String>;

    /// Nearest common ancestor of two commits.
    fn merge_base(&self, base: &str, head: &str) -> Result<String>;

    /// First parent of a commit, `None` for a root commit.
    fn first_parent(&self, commit: &str) -> Result<Option<String>>;

    /// Paths that differ between two revisions, in the order git reports them.
    fn changed_paths(&self, from: &str, to: &str) -> Result<Vec<String>>;
}

/// [`RevisionControl`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    /// Run git inside `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn spawn(&self, args: &[&str]) -> Result<Output> {
        debug!("git {}", args.join(" "));
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| Error::GitCommand {
                command: args.join(" "),
                repo: self.workdir.display().to_string(),
                stderr: e.to_string(),
                status: None,
            })
    }

    fn failure(&self, args: &[&str], output: &Output) -> Error {
        Error::GitCommand {
            command: args.join(" "),
            repo: self.workdir.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            status: output.status.code(),
        }
    }

    /// Run git and return its trimmed stdout, failing on a non-zero status.
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.spawn(args)?;
        if !output.status.success() {
            return Err(self.failure(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl RevisionControl for Git {
    fn resolve_commit(&self, rev: &str) -> Result<String> {
        let spec = format!("{}^{{commit}}", rev);
        self.run(&["rev-parse", "--verify", &spec])
    }

    fn merge_base(&self, base: &str, head: &str) -> Result<String> {
        let args = ["merge-base", base, head];
        let output = self.spawn(&args)?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }
        // Status 1 without a message means the histories are unrelated.
        if output.status.code() == Some(1) && output.stderr.is_empty() {
            return Err(Error::NoMergeBase {
                base: base.to_string(),
                head: head.to_string(),
            });
        }
        Err(self.failure(&args, &output))
    }

    fn first_parent(&self, commit: &str) -> Result<Option<String>> {
        let spec = format!("{}~1", commit);
        let output = self.spawn(&["rev-parse", "--verify", "--quiet", &spec])?;
        if !output.status.success() {
            return Ok(None);
        }
        let parent = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!parent.is_empty()).then_some(parent))
    }

    fn changed_paths(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let args = ["diff", "--name-only", "--no-renames", "-z", from, to];
        let output = self.spawn(&args)?;
        if !output.status.success() {
            return Err(self.failure(&args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .split('\0')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect())
    }
}
