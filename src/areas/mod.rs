//! Repository storage areas
//!
//! - `database`: content-addressed store for blobs and commits
//! - `index`: staging area of pending additions and removals
//! - `refs`: branches, HEAD, ancestor registry and remotes
//! - `repository`: the context object tying the areas together
//! - `workspace`: working tree file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
