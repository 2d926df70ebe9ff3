use crate::TWIG_DIR;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::error::TwigError;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Everything one invocation works on
///
/// The repository is built once per command, and every area reads from and
/// writes to disk through it.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let twig_path = path.join(TWIG_DIR);

        let index = Index::new(twig_path.join("index").into_boxed_path());
        let database = Database::new(twig_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(twig_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open an initialized repository and load its index
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let repository = Self::new(path, writer)?;

        if !repository.is_initialized() {
            return Err(TwigError::user("Not in an initialized Twig directory."));
        }
        repository.index().rehydrate()?;

        Ok(repository)
    }

    /// Open the repository a remote points at
    ///
    /// The remote path may name either the working tree or its `.twig`
    /// directory; relative paths are taken from this repository's root.
    pub fn open_remote(&self, remote_path: &Path) -> anyhow::Result<Repository> {
        let remote_path = if remote_path.is_absolute() {
            remote_path.to_path_buf()
        } else {
            self.path.join(remote_path)
        };
        let remote_root = if remote_path.file_name().is_some_and(|name| name == TWIG_DIR) {
            remote_path.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            remote_path
        };

        if !remote_root.join(TWIG_DIR).is_dir() {
            return Err(TwigError::not_found("Remote directory not found."));
        }

        Self::open(&remote_root, Box::new(std::io::sink()))
    }

    pub fn is_initialized(&self) -> bool {
        self.twig_path().is_dir()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn twig_path(&self) -> PathBuf {
        self.path.join(TWIG_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Commit the current branch points to
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head = self.refs.read_head()?;
        self.database.load_commit(&head)
    }

    /// Tip commit of a branch, if the branch exists
    pub fn branch_commit(&self, name: &BranchName) -> anyhow::Result<Option<Commit>> {
        match self.refs.read_branch(name)? {
            Some(oid) => Ok(Some(self.database.load_commit(&oid)?)),
            None => Ok(None),
        }
    }
}
