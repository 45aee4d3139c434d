//! Errors returned by fallible [`Tree`][crate::Tree] operations.

use thiserror::Error;

/// Result type for tree queries and mutations.
pub type Result<T> = std::result::Result<T, Error>;

/// The ways a tree operation can fail. Every error is reported before the tree is modified, so a
/// failed call always leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument was outside the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The queried element has no equal counterpart in the tree.
    #[error("element not found in tree")]
    NotFound,
}
