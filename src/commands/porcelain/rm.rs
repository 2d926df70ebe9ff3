use crate::areas::repository::Repository;
use crate::error::TwigError;

impl Repository {
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = self.workspace().normalize(path)?;
        let head = self.head_commit()?;

        let mut index = self.index();
        let staged = index.is_staged_for_addition(&path);
        let tracked = head.tracks(&path);

        if !staged && !tracked {
            return Err(TwigError::invalid("No reason to remove the file."));
        }

        if staged {
            index.unstage(&path);
        }
        if tracked {
            self.workspace().remove_file(&path)?;
            index.stage_removal(path);
        }

        index.write_updates()
    }
}
