//! Reference table
//!
//! Branch names map to commit ids, HEAD names the current branch, and two
//! small side tables live next to them: the ancestor registry used by merge
//! and the remote table.
//!
//! ## File Format
//!
//! ```text
//! .twig/HEAD                   ref: refs/heads/<branch>
//! .twig/refs/heads/<branch>    <40-hex commit id>
//! .twig/ancestors              one commit id per line, in recording order
//! .twig/remotes/<name>         path to the remote repository
//! ```
//!
//! Branch names may be hierarchical (`origin/master`); the intermediate
//! directories are removed again once the last branch under them is deleted.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::error::TwigError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Reference table manager
///
/// Every ref file is read under a shared lock and written under an
/// exclusive one.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn ancestors_path(&self) -> Box<Path> {
        self.path.join("ancestors").into_boxed_path()
    }

    pub fn remotes_path(&self) -> Box<Path> {
        self.path.join("remotes").into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.heads_path().join(name.as_ref())
    }

    /// Name of the checked-out branch
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = Self::read_ref_file(&self.head_path())?
            .with_context(|| "HEAD is missing or empty")?;

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(&content)
            .with_context(|| format!("HEAD does not name a branch: {content}"))?;

        BranchName::try_parse_sym_ref_name(&SymRefName::new(symref_match[1].to_string()))
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == name)
    }

    /// Make `name` the current branch
    pub fn set_head(&self, name: &BranchName) -> anyhow::Result<()> {
        let sym_ref = SymRefName::for_branch(name);
        Self::write_ref_file(
            &self.head_path(),
            &format!("ref: {}", sym_ref.as_ref_path()),
        )
    }

    /// Commit the current branch points to
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current = self.current_branch()?;
        self.read_branch(&current)?
            .with_context(|| format!("current branch {current} has no commit"))
    }

    /// Move the current branch to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        match Self::read_ref_file(&self.branch_path(name))? {
            Some(content) => Ok(Some(ObjectId::try_parse(content)?)),
            None => Ok(None),
        }
    }

    /// Point `name` at `oid`, creating the branch if needed
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        tracing::debug!(branch = %name, oid = %oid, "updating branch");
        Self::write_ref_file(&self.branch_path(name), oid.as_ref())
    }

    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(TwigError::invalid("A branch with that name already exists."));
        }

        self.update_branch(name, oid)
    }

    /// Remove the branch pointer and return where it pointed
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self
            .read_branch(name)?
            .ok_or_else(|| TwigError::not_found("A branch with that name does not exist."))?;

        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_empty_parent_dirs(&branch_path, &self.heads_path())?;

        Ok(oid)
    }

    /// Every branch name, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path)?;
                BranchName::try_parse(relative_path.to_string_lossy().replace('\\', "/"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        branches.sort();
        Ok(branches)
    }

    /// Ids in the ancestor registry, in recording order
    pub fn ancestors(&self) -> anyhow::Result<Vec<ObjectId>> {
        match Self::read_ref_file(&self.ancestors_path())? {
            Some(content) => content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| ObjectId::try_parse(line.trim().to_string()))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Append `oid` to the ancestor registry unless it is already there
    pub fn record_ancestor(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let mut ancestors = self.ancestors()?;
        if ancestors.contains(oid) {
            return Ok(());
        }

        tracing::trace!(oid = %oid, "recording ancestor");
        ancestors.push(oid.clone());

        let content = ancestors
            .iter()
            .map(|oid| format!("{oid}\n"))
            .collect::<String>();
        Self::write_ref_file(&self.ancestors_path(), &content)
    }

    fn remote_file(&self, name: &str) -> anyhow::Result<PathBuf> {
        // remote names become file names, so they follow branch naming rules
        let name = BranchName::try_parse(name.to_string())?;
        if name.as_ref().contains('/') {
            return Err(TwigError::user(format!("Invalid remote name: {name}")));
        }

        Ok(self.remotes_path().join(name.as_ref()))
    }

    pub fn add_remote(&self, name: &str, remote_path: &Path) -> anyhow::Result<()> {
        let remote_file = self.remote_file(name)?;
        if remote_file.exists() {
            return Err(TwigError::invalid("A remote with that name already exists."));
        }

        Self::write_ref_file(&remote_file, &remote_path.to_string_lossy())
    }

    pub fn remove_remote(&self, name: &str) -> anyhow::Result<()> {
        let remote_file = self.remote_file(name)?;
        if !remote_file.is_file() {
            return Err(TwigError::not_found("A remote with that name does not exist."));
        }

        std::fs::remove_file(&remote_file)
            .with_context(|| format!("failed to delete remote file at {:?}", remote_file))
    }

    /// Recorded path of a remote
    pub fn remote_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        let remote_file = self.remote_file(name)?;

        Self::read_ref_file(&remote_file)?
            .map(PathBuf::from)
            .ok_or_else(|| TwigError::not_found("A remote with that name does not exist."))
    }

    fn read_ref_file(path: &Path) -> anyhow::Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;

        let content = content.trim();
        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(content.to_string()))
        }
    }

    fn write_ref_file(path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path, root: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != root
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_empty_parent_dirs(parent, root)?;
        }

        Ok(())
    }
}
