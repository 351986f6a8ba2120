//! Merging through the external `yq` command.
//!
//! The fragment paths are written space separated to the standard input of
//! `xargs -L 1 yq -y -s '<reduce>'`, so `yq` slurps every file and reduces
//! them with jq's recursive `*` operator. Whatever `yq` prints is the merged
//! document. Paths containing whitespace are not supported by this merger.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;

use super::StructuredMerge;
use crate::defaults::YQ_MERGE_EXPRESSION;
use crate::error::{Error, Result};

/// [`StructuredMerge`] delegating to `yq` via `xargs`.
#[derive(Debug, Clone)]
pub struct YqMerge {
    root: PathBuf,
    program: String,
}

impl YqMerge {
    /// Run the merge with `root` as working directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: "xargs".to_string(),
        }
    }

    /// Use a different `xargs` binary.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn args() -> [&'static str; 5] {
        ["-L", "1", "yq", "-y", "-s"]
    }

    /// The command line as it would be typed in a shell, for diagnostics.
    pub fn command_line(&self) -> String {
        format!(
            "{} {} '{}'",
            self.program,
            Self::args().join(" "),
            YQ_MERGE_EXPRESSION
        )
    }
}

impl StructuredMerge for YqMerge {
    fn merge(&self, paths: &[PathBuf]) -> Result<String> {
        let input = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("{} <<< {}", self.command_line(), input);

        let spawn_error = |e: std::io::Error| Error::ToolCommand {
            command: self.command_line(),
            stderr: e.to_string(),
            status: None,
        };

        let mut child = Command::new(&self.program)
            .args(Self::args())
            .arg(YQ_MERGE_EXPRESSION)
            .current_dir(&self.root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).map_err(spawn_error)?;
        }

        let output = child.wait_with_output().map_err(spawn_error)?;
        if !output.status.success() {
            return Err(Error::ToolCommand {
                command: self.command_line(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                status: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
