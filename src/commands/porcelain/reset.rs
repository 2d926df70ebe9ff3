use crate::areas::repository::Repository;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let oid = self.database().resolve_commit_id(commit_id)?;
        let target = self.database().load_commit(&oid)?;
        let head = self.head_commit()?;

        self.materialize(&head, &target)?;
        self.refs().update_head(&oid)?;
        self.refs().record_ancestor(&oid)?;

        let mut index = self.index();
        index.clear();
        index.write_updates()
    }
}
