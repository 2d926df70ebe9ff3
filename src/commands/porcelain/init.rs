use crate::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::error::TwigError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(TwigError::user(
                "A Twig version-control system already exists in the current directory.",
            ));
        }

        for object_type in ObjectType::all() {
            fs::create_dir_all(self.database().namespace_path(object_type))
                .with_context(|| format!("Failed to create .twig/objects/{}", object_type.dir_name()))?;
        }

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        fs::create_dir_all(self.refs().remotes_path())
            .context("Failed to create .twig/remotes directory")?;

        let root = Commit::root()?;
        let root_oid = self.database().store(&root)?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .update_branch(&default_branch, &root_oid)
            .context("Failed to create default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;
        self.refs().record_ancestor(&root_oid)?;

        self.index()
            .write_updates()
            .context("Failed to create .twig/index file")?;

        writeln!(
            self.writer(),
            "Initialized empty Twig repository in {}",
            self.twig_path().display()
        )?;

        Ok(())
    }
}
