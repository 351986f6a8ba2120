//! Phase 1: Discovery
//!
//! Works out which two commits to compare and which paths differ between
//! them.
//!
//! ## Choosing the base
//!
//! 1.  Resolve the base revision and head to commit ids. Either failing to
//!     resolve ends the run.
//! 2.  Compare head against the merge base of the two.
//! 3.  If the merge base *is* head (building the base branch itself, or a
//!     head that is already contained in it), compare against head's first
//!     parent instead, i.e. the state of the branch before the latest merge.
//! 4.  If head has no parent it is the repository's first commit; compare
//!     against the empty tree so every file it adds counts as changed.

use log::{debug, info};

use super::{BaseSource, Comparison};
use crate::defaults::EMPTY_TREE_OID;
use crate::error::Result;
use crate::git::RevisionControl;

/// Resolve the [`Comparison`] for `base_revision` and `head`.
pub fn resolve_comparison(
    repo: &dyn RevisionControl,
    base_revision: &str,
    head: &str,
) -> Result<Comparison> {
    let head = repo.resolve_commit(head)?;
    let base = repo.resolve_commit(base_revision)?;
    let merge_base = repo.merge_base(&base, &head)?;
    debug!("merge base of {} and {}: {}", base, head, merge_base);

    let comparison = if merge_base != head {
        Comparison {
            base: merge_base,
            head,
            source: BaseSource::MergeBase,
        }
    } else if let Some(parent) = repo.first_parent(&head)? {
        debug!("head is its own merge base, comparing against first parent");
        Comparison {
            base: parent,
            head,
            source: BaseSource::FirstParent,
        }
    } else {
        debug!("head has no parent, comparing against the empty tree");
        Comparison {
            base: EMPTY_TREE_OID.to_string(),
            head,
            source: BaseSource::EmptyTree,
        }
    };

    info!("Comparing {}", comparison);
    Ok(comparison)
}

/// List every path that differs between the two sides of `comparison`.
pub fn enumerate_changes(repo: &dyn RevisionControl, comparison: &Comparison) -> Result<Vec<String>> {
    let changes = repo.changed_paths(&comparison.base, &comparison.head)?;
    debug!("{} changed path(s)", changes.len());
    Ok(changes)
}

/// Execute Phase 1: resolve the comparison and enumerate its changes.
pub fn execute(
    repo: &dyn RevisionControl,
    base_revision: &str,
    head: &str,
) -> Result<(Comparison, Vec<String>)> {
    let comparison = resolve_comparison(repo, base_revision, head)?;
    let changes = enumerate_changes(repo, &comparison)?;
    Ok((comparison, changes))
}
