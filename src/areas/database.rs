//! Content-addressed object database
//!
//! Blobs and commits are stored in separate namespaces:
//!
//! ```text
//! .twig/objects/blobs/ab/cdef…
//! .twig/objects/commits/12/3456…
//! ```
//!
//! Objects are zlib-compressed and written through a temporary file that is
//! renamed into place, so a reader never observes a half-written object.
//! Storing an object that already exists is a no-op.

use crate::artifacts::objects::MIN_PREFIX_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::error::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn namespace_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.dir_name())
    }

    fn object_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.namespace_path(object_type).join(object_id.to_path())
    }

    pub fn exists(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.object_path(object_type, object_id).is_file()
    }

    /// Store an object and return its id
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.object_path(object.object_type(), &object_id);

        if !object_path.exists() {
            self.write_object(&object_path, object.serialize()?)?;
            tracing::trace!(kind = %object.object_type(), oid = %object_id, "stored object");
        }

        Ok(object_id)
    }

    /// Raw (decompressed) payload of an object
    pub fn load(&self, object_type: ObjectType, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_type, object_id);

        if !object_path.is_file() {
            return Err(TwigError::not_found(format!(
                "No {} with id {} exists.",
                object_type, object_id
            )));
        }

        self.read_object(&object_path)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.load(ObjectType::Blob, object_id)?;
        Blob::deserialize(Cursor::new(content))
    }

    /// Load a commit, verifying that its content still hashes to its id
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.load(ObjectType::Commit, object_id)?;
        let commit = Commit::deserialize(Cursor::new(content))
            .with_context(|| format!("Unable to parse commit {object_id}"))?;

        if commit.oid() != object_id {
            anyhow::bail!(
                "Commit {} is corrupt: its content hashes to {}",
                object_id,
                commit.oid()
            );
        }

        Ok(commit)
    }

    /// Every id stored in a namespace, sorted
    pub fn list(&self, object_type: ObjectType) -> anyhow::Result<Vec<ObjectId>> {
        let namespace = self.namespace_path(object_type);
        let mut object_ids = Vec::new();

        if !namespace.is_dir() {
            return Ok(object_ids);
        }

        for dir in std::fs::read_dir(&namespace)? {
            let dir = dir?;
            if !dir.file_type()?.is_dir() {
                continue;
            }
            let dir_name = dir.file_name().to_string_lossy().to_string();

            for entry in std::fs::read_dir(dir.path())? {
                let entry = entry?;
                let file_name = entry.file_name().to_string_lossy().to_string();

                // skips leftover temp files as well
                if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                    object_ids.push(oid);
                }
            }
        }

        object_ids.sort();
        Ok(object_ids)
    }

    /// Resolve a possibly abbreviated commit id
    pub fn resolve_commit_id(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let missing = || TwigError::not_found("No commit with that id exists.");

        if prefix.len() < MIN_PREFIX_LENGTH || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(missing());
        }

        let mut matches = self.find_commits_by_prefix(prefix)?;
        match matches.len() {
            0 => Err(missing()),
            1 => Ok(matches.remove(0)),
            _ => Err(TwigError::user(format!(
                "Commit id {} is ambiguous ({} candidates).",
                prefix,
                matches.len()
            ))),
        }
    }

    fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let dir_path = self.namespace_path(ObjectType::Commit).join(&prefix[..2]);
        let file_prefix = &prefix[2..];
        let mut matches = Vec::new();

        if !dir_path.is_dir() {
            return Ok(matches);
        }

        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name().to_string_lossy().to_string();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{}{}", &prefix[..2], file_name))
            {
                matches.push(oid);
            }
        }

        Ok(matches)
    }

    /// Copy one object from another database unless it is already here
    ///
    /// Returns whether anything was written.
    pub fn copy_from(
        &self,
        other: &Database,
        object_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<bool> {
        if self.exists(object_type, object_id) {
            return Ok(false);
        }

        let content = other.load(object_type, object_id)?;
        self.write_object(&self.object_path(object_type, object_id), content)?;

        Ok(true)
    }

    fn read_object(&self, object_path: &Path) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
