//! Commit history traversal for `log`
//!
//! - `rev_list`: first-parent walk from a starting commit back to the root
//!
//! Merge commits are shown once; their second parent's history is not
//! followed.

pub mod rev_list;
