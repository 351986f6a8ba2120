//! Default values for path-filtering.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Object id of git's empty tree.
///
/// Diffing against it lists every file of the other revision, which is what
/// a repository's very first commit should be compared with.
pub const EMPTY_TREE_OID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Command that stops the remaining steps of a CircleCI job without failing it.
pub const DEFAULT_HALT_COMMAND: &str = "circleci-agent step halt";

/// jq expression `yq` folds its slurped documents with.
pub const YQ_MERGE_EXPRESSION: &str = "reduce .[] as $item ({}; . * $item)";

/// Split a command line configured as a single string into program and args.
///
/// Returns `None` for a blank command.
pub fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}
