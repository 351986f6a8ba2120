//! Pipeline control.
//!
//! When no fragment applies, the CI job has nothing left to do and the
//! remaining steps should be skipped without failing the build. The
//! [`PipelineControl`] trait is that signal; [`HaltCommand`] sends it by
//! running a command, `circleci-agent step halt` by default.

use std::process::Command;

use log::debug;

use crate::defaults::{split_command, DEFAULT_HALT_COMMAND};
use crate::error::{Error, Result};

/// Controls the surrounding CI pipeline.
pub trait PipelineControl {
    /// Stop the remaining steps of the current job without failing it.
    fn halt(&self) -> Result<()>;
}

/// [`PipelineControl`] that halts by running an external command.
#[derive(Debug, Clone)]
pub struct HaltCommand {
    program: String,
    args: Vec<String>,
}

impl HaltCommand {
    /// Parse a whitespace separated command line.
    pub fn parse(command: &str) -> Result<Self> {
        let (program, args) = split_command(command).ok_or_else(|| Error::ConfigParse {
            message: "halt command is empty".to_string(),
            line: None,
        })?;
        Ok(Self { program, args })
    }

    /// The command line as configured.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for HaltCommand {
    fn default() -> Self {
        Self {
            program: "circleci-agent".to_string(),
            args: vec!["step".to_string(), "halt".to_string()],
        }
    }
}

impl PipelineControl for HaltCommand {
    fn halt(&self) -> Result<()> {
        debug!("running halt command: {}", self.command_line());
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| Error::ToolCommand {
                command: self.command_line(),
                stderr: e.to_string(),
                status: None,
            })?;

        if !output.status.success() {
            return Err(Error::ToolCommand {
                command: self.command_line(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                status: output.status.code(),
            });
        }
        Ok(())
    }
}
