use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::remote::transfer::Transfer;
use crate::error::TwigError;
use std::path::Path;

impl Repository {
    pub fn add_remote(&mut self, name: &str, path: &str) -> anyhow::Result<()> {
        self.refs().add_remote(name, Path::new(path))
    }

    pub fn rm_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.refs().remove_remote(name)
    }

    fn load_remote(&self, name: &str) -> anyhow::Result<Repository> {
        let remote_path = self.refs().remote_path(name)?;
        self.open_remote(&remote_path)
    }

    /// Send the current branch's history to `branch` on the remote
    ///
    /// The remote branch may only move forward: its tip must already be in
    /// the local history.
    pub fn push(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remote = self.load_remote(remote_name)?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head = self.refs().read_head()?;

        if let Some(remote_tip) = remote.refs().read_branch(&branch_name)? {
            let database = self.database();
            let finder = BCAFinder::new(|oid| Ok(database.load_commit(oid)?.parents().to_vec()));

            let known_locally = database.exists(ObjectType::Commit, &remote_tip);
            if !known_locally || !finder.ancestor_path(&head, &remote_tip)? {
                return Err(TwigError::invalid(
                    "Please pull down remote changes before pushing.",
                ));
            }
        }

        Transfer::new(self.database(), remote.database()).copy_missing()?;
        remote.refs().record_ancestor(&head)?;
        remote.refs().update_branch(&branch_name, &head)?;

        Ok(())
    }

    /// Copy a remote branch's history into `<remote>/<branch>`
    pub fn fetch(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        self.fetch_branch(remote_name, branch_name)?;
        Ok(())
    }

    fn fetch_branch(&self, remote_name: &str, branch_name: &str) -> anyhow::Result<BranchName> {
        let remote = self.load_remote(remote_name)?;

        let missing = || TwigError::not_found("That remote does not have that branch.");
        let branch_name = BranchName::try_parse(branch_name.to_string()).map_err(|_| missing())?;
        let remote_tip = remote.refs().read_branch(&branch_name)?.ok_or_else(missing)?;

        Transfer::new(remote.database(), self.database()).copy_missing()?;

        let local_name = BranchName::for_remote(remote_name, &branch_name)?;
        self.refs().update_branch(&local_name, &remote_tip)?;
        self.refs().record_ancestor(&remote_tip)?;

        Ok(local_name)
    }

    /// Fetch, then merge the fetched branch into the current one
    ///
    /// Staged changes are refused before anything is fetched.
    pub fn pull(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        if !self.index().is_empty() {
            return Err(TwigError::invalid("You have uncommitted changes."));
        }

        let local_name = self.fetch_branch(remote_name, branch_name)?;
        self.merge(local_name.as_ref())
    }
}
