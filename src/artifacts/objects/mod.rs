//! Stored objects
//!
//! Only two kinds of objects exist:
//!
//! - **Blob**: the raw bytes of one file at one point in time
//! - **Commit**: a full snapshot (path → blob id) plus message, timestamp and
//!   up to two parents
//!
//! Each kind lives in its own namespace of the object database, so an id is
//! always resolved against a known kind. Ids are SHA-1 digests of the
//! serialized object.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest prefix accepted when resolving abbreviated ids
pub const MIN_PREFIX_LENGTH: usize = 4;
