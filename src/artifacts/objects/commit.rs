//! Commit object
//!
//! A commit records the complete snapshot of tracked files (path → blob id),
//! not a diff against its parent. Its id is the digest of the serialized
//! fields and is computed exactly once, when the commit is constructed.
//!
//! ## Format
//!
//! ```text
//! parent <parent-sha>          (zero, one or two lines)
//! timestamp <unix-seconds> <+HHMM>
//! blob <blob-sha> <path>       (one line per tracked file, sorted by path)
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Tracked files of a commit
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Message of the root commit every repository starts with
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the wall-clock time of new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

/// Timestamp for a new (non-root) commit
///
/// Reads `TWIG_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls
/// back to the local wall clock.
pub fn commit_timestamp() -> DateTime<FixedOffset> {
    std::env::var(COMMIT_DATE_ENV)
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}

/// The epoch, in UTC
pub fn epoch() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .and_then(|utc| utc.timestamp_opt(0, 0).single())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    snapshot: Snapshot,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        snapshot: Snapshot,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> anyhow::Result<Self> {
        if parents.len() > 2 {
            anyhow::bail!("a commit has at most two parents, got {}", parents.len());
        }

        let payload = Self::pack_fields(&parents, &snapshot, &timestamp, &message)?;

        Ok(Commit {
            oid: ObjectId::digest(&payload),
            parents,
            timestamp,
            snapshot,
            message,
        })
    }

    /// The parentless commit created by `init`
    ///
    /// Fixed message, epoch timestamp and empty snapshot make it identical in
    /// every repository, which gives unrelated repositories a shared root.
    pub fn root() -> anyhow::Result<Self> {
        Self::new(
            Vec::new(),
            Snapshot::new(),
            epoch(),
            ROOT_COMMIT_MESSAGE.to_string(),
        )
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Timestamp as printed by `log`, e.g. "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.snapshot.contains_key(path)
    }

    fn pack_fields(
        parents: &[ObjectId],
        snapshot: &Snapshot,
        timestamp: &DateTime<FixedOffset>,
        message: &str,
    ) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        for parent in parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            timestamp.timestamp(),
            timestamp.format("%z")
        ));
        for (path, oid) in snapshot {
            let path = path
                .to_str()
                .with_context(|| format!("path {} is not valid UTF-8", path.display()))?;
            if path.contains('\n') {
                anyhow::bail!("path {path:?} contains a line break");
            }
            lines.push(format!("blob {} {}", oid.as_ref(), path));
        }
        lines.push(String::new());
        lines.push(message.to_string());

        Ok(Bytes::from(lines.join("\n")))
    }
}

fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, zone) = value
        .split_once(' ')
        .context("Invalid commit object: malformed timestamp")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: timestamp is not a number")?;

    if zone.len() != 5 || !zone.is_ascii() {
        anyhow::bail!("Invalid commit object: malformed timezone {zone}");
    }
    let sign = match &zone[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid commit object: malformed timezone {zone}"),
    };
    let hours = zone[1..3].parse::<i32>()?;
    let minutes = zone[3..5].parse::<i32>()?;
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .context("Invalid commit object: timezone out of range")?;

    offset
        .timestamp_opt(seconds, 0)
        .single()
        .context("Invalid commit object: timestamp out of range")
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Self::pack_fields(&self.parents, &self.snapshot, &self.timestamp, &self.message)
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut snapshot = Snapshot::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "timestamp" => timestamp = Some(parse_timestamp(value)?),
                "blob" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed blob line")?;
                    snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {key}"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp")?;

        Self::new(parents, snapshot, timestamp, message.to_string())
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(self.oid.clone())
    }
}
