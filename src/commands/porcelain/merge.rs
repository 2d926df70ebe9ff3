use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::merge::resolution::{
    Resolution, conflict_content, file_directory_clash, touched_paths,
};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::error::TwigError;
use anyhow::Context;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.index().is_empty() {
            return Err(TwigError::invalid("You have uncommitted changes."));
        }

        let missing = || TwigError::not_found("A branch with that name does not exist.");
        let given_name = BranchName::try_parse(branch_name.to_string()).map_err(|_| missing())?;
        let given = self.branch_commit(&given_name)?.ok_or_else(missing)?;

        let current_name = self.refs().current_branch()?;
        if given_name == current_name {
            return Err(TwigError::invalid("Cannot merge a branch with itself."));
        }

        let head = self.head_commit()?;
        Migration::new(self, head.snapshot(), given.snapshot()).check_conflicts()?;

        let database = self.database();
        let finder = BCAFinder::new(|oid| Ok(database.load_commit(oid)?.parents().to_vec()));

        if finder.ancestor_path(head.oid(), given.oid())? {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        let registry = self.refs().ancestors()?;
        let split_oid = finder
            .find_best_common_ancestor(head.oid(), given.oid(), &registry)?
            .ok_or_else(|| TwigError::not_found("No common ancestor found."))?;

        if &split_oid == head.oid() {
            self.materialize(&head, &given)?;
            self.refs().update_head(given.oid())?;
            self.refs().record_ancestor(given.oid())?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        tracing::debug!(
            split = %split.oid(),
            current = %head.oid(),
            given = %given.oid(),
            "three-way merge"
        );
        let conflicted = self.reconcile(&split, &head, &given)?;

        self.refs().record_ancestor(given.oid())?;
        self.create_commit(
            &format!("Merged {} into {}.", given_name, current_name),
            Some(given.oid().clone()),
        )?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Apply the three-way resolution of every touched path to the working
    /// tree and the index, returning whether any path conflicted
    ///
    /// Nothing is written when the result would need a file and a directory
    /// at the same path.
    fn reconcile(&self, split: &Commit, current: &Commit, given: &Commit) -> anyhow::Result<bool> {
        let plan = touched_paths(split.snapshot(), current.snapshot(), given.snapshot())
            .into_iter()
            .map(|path| {
                let resolution = Resolution::classify(
                    split.blob_for(path),
                    current.blob_for(path),
                    given.blob_for(path),
                );
                (path, resolution)
            })
            .collect::<Vec<_>>();

        let result_paths = plan
            .iter()
            .filter(|(path, resolution)| match resolution {
                Resolution::Conflict | Resolution::TakeGiven => true,
                Resolution::Remove => false,
                Resolution::KeepCurrent => current.tracks(path),
            })
            .map(|(path, _)| *path)
            .collect::<BTreeSet<_>>();
        if let Some(path) = file_directory_clash(&result_paths) {
            return Err(TwigError::conflict(format!(
                "Cannot merge: {} would be both a file and a directory.",
                path.display()
            )));
        }

        let mut conflicted = false;

        for (path, resolution) in plan {
            let current_oid = current.blob_for(path);
            let given_oid = given.blob_for(path);

            match resolution {
                Resolution::Conflict => {
                    let current_blob = current_oid
                        .map(|oid| self.database().load_blob(oid))
                        .transpose()?;
                    let given_blob = given_oid
                        .map(|oid| self.database().load_blob(oid))
                        .transpose()?;

                    let content = conflict_content(
                        current_blob.as_ref().map(|blob| blob.content().as_ref()),
                        given_blob.as_ref().map(|blob| blob.content().as_ref()),
                    );
                    self.workspace().write_file(path, &content)?;
                    let blob_id = self.database().store(&Blob::new(content))?;
                    self.index().stage_addition(path.clone(), blob_id);

                    tracing::debug!(path = %path.display(), "merge conflict");
                    conflicted = true;
                }
                Resolution::TakeGiven => {
                    let blob_id = given_oid
                        .with_context(|| format!("no given version of {}", path.display()))?;
                    let blob = self.database().load_blob(blob_id)?;

                    self.workspace().write_file(path, blob.content())?;
                    self.index().stage_addition(path.clone(), blob_id.clone());
                }
                Resolution::Remove => {
                    self.workspace().remove_file(path)?;
                    self.index().stage_removal(path.clone());
                }
                Resolution::KeepCurrent => {}
            }
        }

        Ok(conflicted)
    }
}
