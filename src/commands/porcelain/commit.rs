use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, commit_timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let commit = self.create_commit(message, None)?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch()?,
            commit.oid().to_short_oid(),
            commit.message().lines().next().unwrap_or_default()
        )?;

        Ok(())
    }

    /// Record the staged changes on top of HEAD and advance the current branch
    ///
    /// A merge passes the given branch's tip as `second_parent`; a merge
    /// commit may be created with nothing staged.
    pub(crate) fn create_commit(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<Commit> {
        let mut index = self.index();
        if index.is_empty() && second_parent.is_none() {
            return Err(TwigError::invalid("No changes added to the commit."));
        }
        if message.is_empty() {
            return Err(TwigError::invalid("Please enter a commit message."));
        }

        let parent = self.head_commit()?;
        let mut snapshot = parent.snapshot().clone();
        for (path, oid) in index.additions() {
            snapshot.insert(path.clone(), oid.clone());
        }
        for path in index.removals() {
            snapshot.remove(path);
        }

        let parents = std::iter::once(parent.oid().clone())
            .chain(second_parent)
            .collect();
        let commit = Commit::new(parents, snapshot, commit_timestamp(), message.to_string())?;

        self.database().store(&commit)?;
        self.refs().update_head(commit.oid())?;
        self.refs().record_ancestor(commit.oid())?;

        index.clear();
        index.write_updates()?;

        tracing::debug!(oid = %commit.oid(), files = commit.snapshot().len(), "created commit");

        Ok(commit)
    }
}
