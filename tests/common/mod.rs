//! Shared test utilities for CLI end-to-end tests.
//!
//! The fixture is a throw-away git repository in a temporary directory. Tests
//! commit files into it and then drive the `path-filtering` binary against it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let repo = GitFixture::new();
//!     let head = repo.commit(&[("src/main.rs", "fn main() {}")], "initial");
//!     repo.command().arg("plan").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::GitFixture;
}

/// Environment variables the binary reads; cleared so the host CI cannot leak in.
const CONFIG_ENV: &[&str] = &[
    "OUTPUT_PATH",
    "SHARED_FILES",
    "CIRCLE_SHA1",
    "BASE_REVISION",
    "MAPPING",
    "HALT_COMMAND",
    "MERGER",
    "REPO_PATH",
    "RUST_LOG",
];

/// Marker file the fixture's halt command creates.
pub const HALT_MARKER: &str = "halted.marker";

/// A temporary git repository.
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

impl GitFixture {
    /// Create and `git init` an empty repository.
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.git(&["init", "-q"]);
        fixture
    }

    /// Run git in the repository, panicking if it fails, and return stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=Test",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Write a file into the working tree without committing it.
    pub fn write(&self, path: &str, content: &str) {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
    }

    /// Write `files`, commit everything and return the new commit id.
    pub fn commit(&self, files: &[(&str, &str)], message: &str) -> String {
        for (path, content) in files {
            self.write(path, content);
        }
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
        self.git(&["rev-parse", "HEAD"])
    }

    /// Get the path to the repository.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file from the working tree.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Whether the halt command ran.
    pub fn halted(&self) -> bool {
        self.path().join(HALT_MARKER).exists()
    }

    /// A `path-filtering` command running inside the repository with a clean
    /// environment and a halt command that only leaves a marker file.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("path-filtering");
        cmd.current_dir(self.path());
        for var in CONFIG_ENV {
            cmd.env_remove(var);
        }
        cmd.env("HALT_COMMAND", format!("touch {}", HALT_MARKER));
        cmd.env("NO_COLOR", "1");
        cmd
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}
