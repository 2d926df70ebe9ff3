//! Working-tree synchronization
//!
//! Moving the working tree from one snapshot to another is planned first and
//! applied second. Planning checks for untracked files that the target
//! snapshot would overwrite, so a rejected checkout leaves every file
//! untouched.

pub mod migration;
