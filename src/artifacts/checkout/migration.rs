//! Snapshot migration and untracked-file detection
//!
//! This module handles moving the working tree from the current commit's
//! snapshot to a target snapshot, which involves:
//!
//! 1. Detecting untracked files that the target would overwrite
//! 2. Planning file system operations (add, delete, modify)
//! 3. Applying them to the workspace
//!
//! ## Untracked files
//!
//! A file on disk is in the way when the current snapshot does not track it
//! but the target snapshot does. Any such file aborts the migration before a
//! single file is touched.
//!
//! Files tracked by the current snapshot are replaced unconditionally, so
//! unstaged edits to them are lost.

use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::{TwigError, UNTRACKED_IN_THE_WAY};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// Type of file system action required by a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Overwrite a file tracked on both sides
    Modify,
}

/// Set of planned actions grouped by type
pub type ActionsSet = HashMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

/// Working tree migration planner and executor
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Snapshot the working tree currently reflects
    current: &'r Snapshot,
    /// Snapshot to materialize
    target: &'r Snapshot,
    /// Planned file system actions
    actions: ActionsSet,
    /// Untracked files the target would overwrite
    conflicts: BTreeSet<PathBuf>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &'r Snapshot, target: &'r Snapshot) -> Self {
        let actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self {
            repository,
            current,
            target,
            actions,
            conflicts: BTreeSet::new(),
        }
    }

    pub fn actions_of(&self, action_type: ActionType) -> &[(PathBuf, Option<ObjectId>)] {
        self.actions
            .get(&action_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn conflicts(&self) -> &BTreeSet<PathBuf> {
        &self.conflicts
    }

    /// Fail with a conflict if an untracked file is in the way
    pub fn check_conflicts(&mut self) -> anyhow::Result<()> {
        self.conflicts = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| !self.current.contains_key(path) && self.target.contains_key(path))
            .collect();

        if !self.conflicts.is_empty() {
            tracing::debug!(paths = ?self.conflicts, "untracked files in the way");
            return Err(TwigError::conflict(UNTRACKED_IN_THE_WAY));
        }

        Ok(())
    }

    /// Check, plan and apply the migration
    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.check_conflicts()?;
        self.plan_changes();
        self.update_workspace()
    }

    fn plan_changes(&mut self) {
        for path in self.current.keys() {
            if !self.target.contains_key(path) {
                self.record_change(ActionType::Delete, path.clone(), None);
            }
        }

        for (path, oid) in self.target {
            let action_type = if self.current.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            self.record_change(action_type, path.clone(), Some(oid.clone()));
        }
    }

    fn record_change(&mut self, action_type: ActionType, path: PathBuf, oid: Option<ObjectId>) {
        self.actions
            .entry(action_type)
            .or_default()
            .push((path, oid));
    }

    fn update_workspace(&self) -> anyhow::Result<()> {
        self.repository.workspace().apply_migration(self)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        self.repository.database().load_blob(object_id)
    }
}
