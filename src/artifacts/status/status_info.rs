use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let head = self.repository.head_commit()?;
        let workspace_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .collect::<FileSet>();

        let mut workspace_changeset = ChangeSet::new();
        self.check_tracked_files(&head, index, &workspace_files, &mut workspace_changeset)?;
        self.check_staged_files(index, &workspace_files, &mut workspace_changeset)?;

        let untracked_files = workspace_files
            .iter()
            .filter(|path| {
                !index.is_staged_for_addition(path)
                    && (!head.tracks(path) || index.is_staged_for_removal(path))
            })
            .cloned()
            .collect();

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().clone(),
            workspace_changeset,
            untracked_files,
        })
    }

    /// Files the HEAD commit tracks that changed on disk without being staged
    fn check_tracked_files(
        &self,
        head: &Commit,
        index: &Index,
        workspace_files: &FileSet,
        changeset: &mut ChangeSet,
    ) -> anyhow::Result<()> {
        for (path, oid) in head.snapshot() {
            if index.is_staged_for_addition(path) || index.is_staged_for_removal(path) {
                continue;
            }

            if !workspace_files.contains(path) {
                changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if !self.matches_disk(path, oid)? {
                changeset.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        Ok(())
    }

    /// Files staged for addition whose disk content moved on since staging
    fn check_staged_files(
        &self,
        index: &Index,
        workspace_files: &FileSet,
        changeset: &mut ChangeSet,
    ) -> anyhow::Result<()> {
        for (path, oid) in index.additions() {
            if !workspace_files.contains(path) {
                changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if !self.matches_disk(path, oid)? {
                changeset.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        Ok(())
    }

    fn matches_disk(&self, path: &Path, oid: &ObjectId) -> anyhow::Result<bool> {
        let content = self.repository.workspace().read_file(path)?;
        Ok(&ObjectId::digest(&content) == oid)
    }
}
