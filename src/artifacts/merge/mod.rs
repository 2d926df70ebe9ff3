//! Merge algorithms
//!
//! - `bca_finder`: reachability, distances and split point discovery
//! - `resolution`: per-path three-way classification and conflict markers

pub mod bca_finder;
pub mod resolution;
