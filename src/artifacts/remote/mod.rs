//! Remote repositories
//!
//! A remote is another repository on the local file system. Exchanging
//! history with it means copying missing objects from one object store to
//! the other, and only then moving a branch pointer.

pub mod transfer;
