//! Phase 2: Selection
//!
//! Turns the change set into the list of fragment files to merge.
//!
//! ## Process
//!
//! 1.  **Fire rules**: a mapping rule fires when its anchored pattern matches
//!     at least one changed path. Rules are independent of each other.
//! 2.  **Aggregate**: the shared files followed by the paths of every fired
//!     rule, deduplicated.
//! 3.  **Validate**: every aggregated path must exist below the repository
//!     root. Missing paths are all reported at once.
//!
//! ## Merge order
//!
//! Aggregation keeps the first occurrence of each path: the shared files
//! first, then the fired rules in declaration order with each rule's paths as
//! listed. Shared fragments therefore act as defaults that rule fragments can
//! override. Fragments contributed by different rules should not set the same
//! non-mapping keys; when they do, the later fragment in this order wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::MappingRule;
use crate::error::{Error, Result};

/// Rules whose pattern matches at least one of `changes`, in declaration order.
pub fn fired_rules<'a>(rules: &'a [MappingRule], changes: &[String]) -> Vec<&'a MappingRule> {
    rules
        .iter()
        .filter(|rule| match changes.iter().find(|c| rule.matches(c)) {
            Some(change) => {
                debug!("rule '{}' fired on {}", rule.pattern(), change);
                true
            }
            None => false,
        })
        .collect()
}

/// Union of the shared files and the fired rules' paths, without duplicates.
pub fn aggregate_paths<'a, I>(fired: I, shared_files: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a MappingRule>,
{
    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    let candidates = shared_files
        .iter()
        .chain(fired.into_iter().flat_map(|rule| rule.paths.iter()));
    for path in candidates {
        if seen.insert(path.as_str()) {
            paths.push(path.clone());
        }
    }
    paths
}

/// Paths from `paths` that do not exist below `root`.
pub fn missing_paths(root: &Path, paths: &[String]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(PathBuf::from)
        .filter(|p| !root.join(p).exists())
        .collect()
}

/// Fail with [`Error::MissingFiles`] unless every path exists below `root`.
pub fn validate_paths(root: &Path, paths: &[String]) -> Result<Vec<PathBuf>> {
    let missing = missing_paths(root, paths);
    if !missing.is_empty() {
        return Err(Error::MissingFiles { paths: missing });
    }
    Ok(paths.iter().map(PathBuf::from).collect())
}

/// Execute Phase 2 up to aggregation: fire rules and collect their paths.
pub fn execute(
    rules: &[MappingRule],
    changes: &[String],
    shared_files: &[String],
) -> (Vec<MappingRule>, Vec<String>) {
    let fired = fired_rules(rules, changes);
    let paths = aggregate_paths(fired.iter().copied(), shared_files);
    (fired.into_iter().cloned().collect(), paths)
}
