//! Commit graph queries for merge
//!
//! This module answers the three questions a merge asks about history:
//!
//! - is one commit reachable from another (`ancestor_path`)
//! - how many parent links separate them (`distance_to`)
//! - which commit should serve as the split point of two branch tips
//!   (`find_best_common_ancestor`)
//!
//! ## Algorithm Overview
//!
//! The split point is not searched for in the whole graph. Candidates come
//! from the ancestor registry, the ordered list of commits recorded whenever a
//! branch tip is created or moved. The search:
//!
//! 1. Walks the history of both tips, marking every commit with the side(s) it
//!    was reached from
//! 2. Keeps the registry entries reached from both sides
//! 3. Returns the candidate with the shortest parent chain from the first tip,
//!    ties going to the candidate recorded first
//!
//! All traversals are iterative, with an explicit stack or queue and a
//! visited set, so deep histories cannot overflow the call stack.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = BCAFinder::new(|commit_id| {
//!     Ok(database.load_commit(commit_id)?.parents().to_vec())
//! });
//!
//! let split_point = finder.find_best_common_ancestor(&head, &given, &registry)?;
//! ```
//!
//! ## Debug Logging
//!
//! Building with the `debug_merge` feature emits a `tracing` event for every
//! step of the search (`cargo build --features debug_merge`, then run with
//! `TWIG_LOG=debug`).

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Commit graph queries over any commit storage
///
/// # Type Parameters
///
/// * `ParentsLoaderFn` - A function that takes a commit ObjectId and returns
///   its parent ids (empty for the root commit). Loading failures propagate
///   out of every query.
pub struct BCAFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> BCAFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// Creates a new finder with the given parents loader function
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let finder = BCAFinder::new(|commit_id| {
    ///     Ok(database.load_commit(commit_id)?.parents().to_vec())
    /// });
    /// ```
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Whether `target` is reachable from `start` through parent links
    ///
    /// A commit is its own ancestor. Depth-first, with an explicit stack.
    pub fn ancestor_path(&self, start: &ObjectId, target: &ObjectId) -> anyhow::Result<bool> {
        let mut stack = vec![start.clone()];
        let mut visited = HashSet::new();

        while let Some(commit_id) = stack.pop() {
            if &commit_id == target {
                return Ok(true);
            }
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            for parent_id in (self.parents_loader)(&commit_id)? {
                if !visited.contains(&parent_id) {
                    stack.push(parent_id);
                }
            }
        }

        Ok(false)
    }

    /// Length of the shortest parent chain leading from `start` to `target`
    ///
    /// `Some(0)` when both are the same commit, `None` when `target` is not
    /// reachable. Breadth-first, with an explicit queue.
    pub fn distance_to(
        &self,
        target: &ObjectId,
        start: &ObjectId,
    ) -> anyhow::Result<Option<usize>> {
        let mut queue = VecDeque::from([(start.clone(), 0usize)]);
        let mut visited = HashSet::from([start.clone()]);

        while let Some((commit_id, distance)) = queue.pop_front() {
            if &commit_id == target {
                return Ok(Some(distance));
            }

            for parent_id in (self.parents_loader)(&commit_id)? {
                if visited.insert(parent_id.clone()) {
                    queue.push_back((parent_id, distance + 1));
                }
            }
        }

        Ok(None)
    }

    /// Shortest distance from `start` to every commit it can reach
    fn distances_from(&self, start: &ObjectId) -> anyhow::Result<HashMap<ObjectId, usize>> {
        let mut queue = VecDeque::from([start.clone()]);
        let mut distances = HashMap::from([(start.clone(), 0usize)]);

        while let Some(commit_id) = queue.pop_front() {
            let distance = distances.get(&commit_id).copied().unwrap_or_default();

            for parent_id in (self.parents_loader)(&commit_id)? {
                if !distances.contains_key(&parent_id) {
                    distances.insert(parent_id.clone(), distance + 1);
                    queue.push_back(parent_id);
                }
            }
        }

        Ok(distances)
    }

    /// Finds the split point of two branch tips among registry candidates
    ///
    /// # Arguments
    ///
    /// * `source_commit_id` - The current branch tip; distances are measured from here
    /// * `target_commit_id` - The tip being merged in
    /// * `registry` - Candidate commits, in recording order
    ///
    /// # Returns
    ///
    /// - `Some(ObjectId)` - The reachable-from-both candidate closest to the source
    /// - `None` - If no candidate is reachable from both tips
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // Branched history, registry [A, B, C]:
    /// //     A
    /// //    / \
    /// //   B   C
    /// let bca = finder.find_best_common_ancestor(&b, &c, &[a, b, c])?;
    /// assert_eq!(bca, Some(a));
    /// ```
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
        registry: &[ObjectId],
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_distances = self.distances_from(source_commit_id)?;
        let target_distances = self.distances_from(target_commit_id)?;

        let visit_state = |commit_id: &ObjectId| {
            let mut state = VisitState::NONE;
            if source_distances.contains_key(commit_id) {
                state |= VisitState::VISITED_FROM_SOURCE;
            }
            if target_distances.contains_key(commit_id) {
                state |= VisitState::VISITED_FROM_TARGET;
            }
            state
        };

        let mut best: Option<(&ObjectId, usize)> = None;
        for candidate in registry {
            let state = visit_state(candidate);
            debug_log!("Evaluating candidate {}: state={}", candidate, state);

            if !state.contains(VisitState::VISITED_FROM_BOTH) {
                continue;
            }

            let distance = source_distances
                .get(candidate)
                .copied()
                .unwrap_or(usize::MAX);
            // strictly smaller, so that ties keep the first candidate found
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                debug_log!("New best candidate {} at distance {}", candidate, distance);
                best = Some((candidate, distance));
            }
        }

        debug_log!(
            "Best common ancestor of {} and {}: {:?}",
            source_commit_id,
            target_commit_id,
            best.map(|(oid, _)| oid.as_ref())
        );

        Ok(best.map(|(oid, _)| oid.clone()))
    }
}
