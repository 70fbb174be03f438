//! Error taxonomy for store, query, and mutation operations.
//!
//! Every core operation returns [`Result<T>`], an alias over [`TrackerError`].
//! Validation and not-found outcomes are ordinary, recoverable results that the
//! caller is expected to report back to the user. Integrity and store failures
//! carry the underlying SQLite message for diagnostics and are never retried
//! by the core.
//!
//! ## Status Mapping
//!
//! Collaborating layers that speak HTTP map errors through
//! [`TrackerError::status_code`]:
//!
//! | Variant      | Code |
//! |--------------|------|
//! | `Validation` | 400  |
//! | `NotFound`   | 404  |
//! | `Integrity`  | 500  |
//! | `Store`      | 500  |

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result alias used by all repository operations.
pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// A required field is missing or empty, or an update carries no fields.
    #[error("{0}")]
    Validation(String),

    /// The referenced problem does not exist.
    #[error("Problem not found: {0}")]
    NotFound(i64),

    /// A relational constraint rejected the statement.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Any other storage failure.
    #[error("Store failure: {0}")]
    Store(#[source] rusqlite::Error),
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP-equivalent status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Integrity(_) | Self::Store(_) => 500,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}

impl From<rusqlite::Error> for TrackerError {
    fn from(err: rusqlite::Error) -> Self {
        if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            return Self::Integrity(err.to_string());
        }
        Self::Store(err)
    }
}
