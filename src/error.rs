//! Domain errors
//!
//! Every failure a user can trigger on purpose is one of the [`TwigError`]
//! variants. They travel inside `anyhow::Error` like any other error, so
//! callers that care about the category use `downcast_ref::<TwigError>()`.
//! Filesystem and corruption failures stay plain `anyhow` errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TwigError {
    /// Bad arguments, wrong working directory, already initialized repository
    #[error("{0}")]
    User(String),

    /// A request that is well-formed but not allowed in the current state
    #[error("{0}")]
    InvalidOperation(String),

    /// Working tree files block the operation
    #[error("{0}")]
    Conflict(String),

    /// Unknown branch, commit, remote or file
    #[error("{0}")]
    NotFound(String),
}

impl TwigError {
    pub fn user(message: impl Into<String>) -> anyhow::Error {
        TwigError::User(message.into()).into()
    }

    pub fn invalid(message: impl Into<String>) -> anyhow::Error {
        TwigError::InvalidOperation(message.into()).into()
    }

    pub fn conflict(message: impl Into<String>) -> anyhow::Error {
        TwigError::Conflict(message.into()).into()
    }

    pub fn not_found(message: impl Into<String>) -> anyhow::Error {
        TwigError::NotFound(message.into()).into()
    }

    /// Classify an arbitrary error, if it carries a domain error
    pub fn of(error: &anyhow::Error) -> Option<&TwigError> {
        error.downcast_ref::<TwigError>()
    }
}

pub const UNTRACKED_IN_THE_WAY: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.";
