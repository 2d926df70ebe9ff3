//! Command implementations
//!
//! - `porcelain`: User-facing commands for version control workflows
//!   (add, commit, merge, push, ...)

pub mod porcelain;
