use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::error::TwigError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// First-parent history from HEAD
    pub fn log(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;

        for commit in RevList::new(self, head) {
            self.show_commit(&commit?)?;
        }

        Ok(())
    }

    /// Every commit ever made, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        for commit in self.all_commits()? {
            self.show_commit(&commit)?;
        }

        Ok(())
    }

    /// Ids of the commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let matches = self
            .all_commits()?
            .into_iter()
            .filter(|commit| commit.message() == message)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(TwigError::not_found("Found no commit with that message."));
        }

        for commit in matches {
            writeln!(self.writer(), "{}", commit.oid())?;
        }

        Ok(())
    }

    fn all_commits(&self) -> anyhow::Result<Vec<Commit>> {
        let mut commits = self
            .database()
            .list(ObjectType::Commit)?
            .iter()
            .map(|oid| self.database().load_commit(oid))
            .collect::<anyhow::Result<Vec<_>>>()?;

        commits.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a.oid().cmp(b.oid()))
        });

        Ok(commits)
    }

    fn show_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "{}", format!("commit {}", commit.oid()).yellow())?;
        if let (Some(first), Some(second)) = (commit.parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
