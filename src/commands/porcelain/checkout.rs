use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::error::TwigError;

impl Repository {
    /// Switch to another branch, replacing the working tree with its snapshot
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let missing = || TwigError::not_found("No such branch exists.");

        let branch_name = BranchName::try_parse(branch_name.to_string()).map_err(|_| missing())?;
        let target = self.branch_commit(&branch_name)?.ok_or_else(missing)?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::invalid("No need to checkout the current branch."));
        }

        let head = self.head_commit()?;
        self.materialize(&head, &target)?;
        self.refs().set_head(&branch_name)?;

        let mut index = self.index();
        index.clear();
        index.write_updates()
    }

    /// Restore one file from HEAD, or from the commit `commit_id` names
    ///
    /// The restored file is not staged.
    pub fn checkout_file(&mut self, commit_id: Option<&str>, file: &str) -> anyhow::Result<()> {
        let commit = match commit_id {
            Some(commit_id) => {
                let oid = self.database().resolve_commit_id(commit_id)?;
                self.database().load_commit(&oid)?
            }
            None => self.head_commit()?,
        };

        let missing = || TwigError::not_found("File does not exist in that commit.");
        let path = self.workspace().normalize(file).map_err(|_| missing())?;
        let blob_id = commit.blob_for(&path).ok_or_else(missing)?;

        let blob = self.database().load_blob(blob_id)?;
        self.workspace().write_file(&path, blob.content())
    }

    /// Replace the working tree tracked by `current` with `target`'s snapshot
    pub(crate) fn materialize(&self, current: &Commit, target: &Commit) -> anyhow::Result<()> {
        tracing::debug!(from = %current.oid(), to = %target.oid(), "materializing snapshot");

        Migration::new(self, current.snapshot(), target.snapshot()).apply_changes()
    }
}
