//! Working tree status inspection
//!
//! This module compares the working tree against the index and the HEAD
//! commit.
//!
//! ## Components
//!
//! - `file_change`: how a tracked file differs from what the next commit holds
//! - `status_info`: status information aggregation

pub mod file_change;
pub mod status_info;
