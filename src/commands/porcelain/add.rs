use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::error::TwigError;

impl Repository {
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let path = self.workspace().normalize(path)?;

        if !self.workspace().file_exists(&path) {
            return Err(TwigError::not_found("File does not exist."));
        }

        let head = self.head_commit()?;
        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id()?;

        let mut index = self.index();
        if head.blob_for(&path) == Some(&blob_id) {
            // back to the committed version: nothing left to stage
            index.cancel_removal(&path);
            index.unstage(&path);
        } else {
            self.database().store(&blob)?;
            index.stage_addition(path, blob_id);
        }

        if index.has_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}
