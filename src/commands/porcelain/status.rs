use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let status_info = {
            let index = self.index();
            Status::new(self).initialize(&index)?
        };

        self.print_branches(&status_info)?;
        self.print_file_section("Staged Files", status_info.staged_files.iter())?;
        self.print_file_section("Removed Files", status_info.removed_files.iter())?;

        let mut writer = self.writer();
        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &status_info.workspace_changeset {
            writeln!(writer, "{} {}", path.display(), change.label())?;
        }
        writeln!(writer)?;
        drop(writer);

        self.print_file_section("Untracked Files", status_info.untracked_files.iter())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &status_info.branches {
            if branch == &status_info.current_branch {
                writeln!(writer, "{}", format!("*{branch}").green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        Ok(())
    }

    fn print_file_section<'p>(
        &self,
        title: &str,
        paths: impl Iterator<Item = &'p std::path::PathBuf>,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {title} ===")?;
        for path in paths {
            writeln!(writer, "{}", path.display())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
