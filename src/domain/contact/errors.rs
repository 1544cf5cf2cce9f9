//! Contact directory error types.

use thiserror::Error;

use crate::domain::contact::ContactName;

/// Errors surfaced by contact directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactDirectoryError {
    /// Name or number was empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The number failed phone validation and was never persisted.
    #[error("'{0}' is not a valid phone number")]
    InvalidNumber(String),

    /// Unknown contact name.
    #[error("Contact '{0}' not found")]
    NotFound(ContactName),

    /// Underlying store failure.
    #[error("Contact store error: {0}")]
    Store(String),
}
