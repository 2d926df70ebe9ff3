//! One staged change
//!
//! An entry is either a path staged for addition (with the blob id of the
//! content captured at staging time) or a path staged for removal.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::{Context, anyhow};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

/// Size of the fixed part of an entry: kind, blob id and path length
pub const ENTRY_FIXED_SIZE: usize = 1 + 20 + 2;

const MAX_PATH_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexEntry {
    Addition { path: PathBuf, oid: ObjectId },
    Removal { path: PathBuf },
}

impl IndexEntry {
    pub fn path(&self) -> &PathBuf {
        match self {
            IndexEntry::Addition { path, .. } | IndexEntry::Removal { path } => path,
        }
    }

    fn kind(&self) -> u8 {
        match self {
            IndexEntry::Addition { .. } => b'A',
            IndexEntry::Removal { .. } => b'R',
        }
    }

    /// Length of the path part, read from the fixed part of an entry
    pub fn path_len(fixed: &[u8]) -> anyhow::Result<usize> {
        if fixed.len() < ENTRY_FIXED_SIZE {
            return Err(anyhow!("Truncated index entry"));
        }
        Ok(usize::from(u16::from_be_bytes([
            fixed[ENTRY_FIXED_SIZE - 2],
            fixed[ENTRY_FIXED_SIZE - 1],
        ])))
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self
            .path()
            .to_str()
            .with_context(|| format!("path {} is not valid UTF-8", self.path().display()))?;
        if path.len() > MAX_PATH_SIZE {
            return Err(anyhow!("path {path} is too long for the index"));
        }

        let mut bytes = Vec::with_capacity(ENTRY_FIXED_SIZE + path.len());
        bytes.write_u8(self.kind())?;
        match self {
            IndexEntry::Addition { oid, .. } => oid.write_h40_to(&mut bytes)?,
            IndexEntry::Removal { .. } => bytes.write_all(&[0u8; 20])?,
        }
        bytes.write_u16::<NetworkEndian>(path.len() as u16)?;
        bytes.write_all(path.as_bytes())?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let kind = reader.read_u8()?;
        let oid = ObjectId::read_h40_from(&mut reader)?;
        let path_len = usize::from(reader.read_u16::<NetworkEndian>()?);

        let mut path = vec![0u8; path_len];
        reader.read_exact(&mut path)?;
        let path = PathBuf::from(String::from_utf8(path)?);

        match kind {
            b'A' => Ok(IndexEntry::Addition { path, oid }),
            b'R' => Ok(IndexEntry::Removal { path }),
            other => Err(anyhow!("Unknown index entry kind {other:#x}")),
        }
    }
}
