//! Porcelain commands (user-facing operations)
//!
//! Each command is an `impl Repository` block that reads the index and
//! references, consults the object store and commit graph, and writes back
//! the updated state.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`, `rm`: Stage files for addition or removal
//! - `commit`: Record the staged snapshot
//! - `log`: Show commit history, list or search every commit
//! - `status`: Show branches, staged changes and working tree changes
//! - `branch`: Create or delete branches
//! - `checkout`: Switch branches or restore files
//! - `reset`: Move the current branch to an arbitrary commit
//! - `merge`: Three-way merge of another branch
//! - `remote`: Manage remotes, push, fetch and pull

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
