//! twig: a small local version-control engine
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: the stateful parts of a repository (object database, index,
//!   refs, workspace) and the `Repository` context that ties them together
//! - `artifacts`: the data types and algorithms working on those areas
//!   (objects, branch names, checkout migrations, merge resolution, ...)
//! - `commands`: one `impl Repository` block per user-facing command
//! - `error`: the domain error taxonomy
//! - `telemetry`: opt-in diagnostics

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod error;
pub mod telemetry;

/// Name of the directory holding all repository metadata
pub const TWIG_DIR: &str = ".twig";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
