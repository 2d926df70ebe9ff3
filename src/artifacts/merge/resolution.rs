//! Three-way reconciliation of a single path
//!
//! Every path present in the split point (S), the current tip (C) or the
//! given tip (G) is classified on its own. Rules are tried in order and the
//! first match wins:
//!
//! 1. **Conflict**: modified relative to S on both sides, and C and G
//!    disagree (including on whether the file exists at all)
//! 2. **Take given**: only G changed an existing file, or only G added it
//! 3. **Remove**: C left the file untouched and G deleted it
//! 4. **Keep current**: anything else, including identical changes on both
//!    sides and changes made only on the current side
//!
//! A side "modified" a path when its version differs from S: different
//! blobs, or present on one side of the comparison only.

use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Conflict,
    TakeGiven,
    Remove,
    KeepCurrent,
}

fn modified(split: Option<&ObjectId>, side: Option<&ObjectId>) -> bool {
    split != side
}

impl Resolution {
    pub fn classify(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> Self {
        let current_modified = modified(split, current);
        let given_modified = modified(split, given);

        if (current.is_some() || given.is_some())
            && current_modified
            && given_modified
            && current != given
        {
            return Resolution::Conflict;
        }

        match (split, current, given) {
            (Some(_), Some(_), Some(_)) if !current_modified && given_modified => {
                Resolution::TakeGiven
            }
            (None, None, Some(_)) => Resolution::TakeGiven,
            (Some(_), Some(_), None) if !current_modified => Resolution::Remove,
            _ => Resolution::KeepCurrent,
        }
    }
}

/// Content written for a conflicted path; a missing side contributes nothing
pub fn conflict_content(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let given = given.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + given.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(given);
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    Bytes::from(content)
}

/// Every path any of the three snapshots mentions, sorted
pub fn touched_paths<'s>(
    split: &'s Snapshot,
    current: &'s Snapshot,
    given: &'s Snapshot,
) -> BTreeSet<&'s PathBuf> {
    split
        .keys()
        .chain(current.keys())
        .chain(given.keys())
        .collect()
}

/// First path of a merge result that would also have to be a directory
/// holding another path of the same result, e.g. `a` next to `a/x`
pub fn file_directory_clash<'p>(paths: &BTreeSet<&'p PathBuf>) -> Option<&'p PathBuf> {
    // descendants of a path sort right after it
    paths
        .iter()
        .zip(paths.iter().skip(1))
        .find(|(path, next)| next.starts_with(path))
        .map(|(path, _)| *path)
}
