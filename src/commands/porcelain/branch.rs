use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::error::TwigError;

impl Repository {
    /// Create a branch at HEAD without switching to it
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head)?;
        self.refs().record_ancestor(&head)?;

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let missing = || TwigError::not_found("A branch with that name does not exist.");

        let branch_name = BranchName::try_parse(branch_name.to_string()).map_err(|_| missing())?;
        if !self.refs().branch_exists(&branch_name) {
            return Err(missing());
        }
        if self.refs().is_current_branch(&branch_name)? {
            return Err(TwigError::invalid("Cannot remove the current branch."));
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
