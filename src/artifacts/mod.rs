//! Version-control data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `checkout`: Snapshot migration and untracked-file detection
//! - `index`: Index file format (header, entries, checksum)
//! - `log`: Commit history traversal
//! - `merge`: Split point discovery and three-way reconciliation
//! - `objects`: Object types (blob, commit)
//! - `remote`: Object transfer between repositories
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod remote;
pub mod status;
