//! Unified error type for Contrail.
//!
//! Wraps the internal error taxonomy and presents a smaller, stable set of
//! variants to library users.

use thiserror::Error;

/// All Contrail errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed request field
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Unknown flight, or no sample at the requested timestamp
    #[error("not found: {0}")]
    NotFound(String),

    /// Non-terminal telemetry for a flight that has already landed
    #[error("flight {0} is archived")]
    Archived(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Journal write or replay failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Contrail operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if the request itself was rejected.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }

    /// Check if the flight was already archived.
    pub fn is_archived(&self) -> bool {
        matches!(self, Error::Archived(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_) | Error::Storage(_))
    }
}

impl From<contrail_core::Error> for Error {
    fn from(e: contrail_core::Error) -> Self {
        use contrail_core::Error as CoreError;
        match e {
            CoreError::Validation { field, reason } => Error::InvalidInput { field, reason },
            CoreError::FlightNotFound { id } => Error::NotFound(format!("flight {}", id)),
            CoreError::SampleNotFound { id, timestamp } => {
                Error::NotFound(format!("flight {} at {}", id, timestamp))
            }
            CoreError::AlreadyArchived { id } => Error::Archived(id),
            CoreError::Storage(msg) => Error::Storage(msg),
            CoreError::Corruption(msg) => Error::Storage(format!("corruption: {}", msg)),
            CoreError::Io(io_err) => Error::Io(io_err),
            CoreError::Config(msg) => Error::Config(msg),
            CoreError::Internal(msg) => Error::Internal(msg),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
