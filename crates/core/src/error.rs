//! Error types for the tracking engine
//!
//! Every failure the engine can report falls into one of three kinds:
//!
//! | Kind | Meaning | Mutation |
//! |------|---------|----------|
//! | Validation | malformed or missing input, or a policy rejection | none |
//! | NotFound | unknown flight, or no sample at the requested instant | none |
//! | Storage | journal or file system failure | none applied |

use thiserror::Error;

/// Result type alias for tracking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kind, the coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller error, no state was touched
    Validation,
    /// The flight or the requested sample does not exist
    NotFound,
    /// Persistence failed
    Storage,
    /// Bug or invariant violation
    Internal,
}

/// Errors raised by the tracking engine
#[derive(Debug, Error)]
pub enum Error {
    /// Request field missing or malformed
    #[error("validation failed for '{field}': {reason}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Non-terminal telemetry for a flight that was already archived
    #[error("flight {id} is already archived")]
    AlreadyArchived {
        /// The archived flight
        id: String,
    },

    /// No active or archived flight with this id
    #[error("flight not found: {id}")]
    FlightNotFound {
        /// The unknown flight id
        id: String,
    },

    /// The flight exists but has no sample recorded at the timestamp
    #[error("no position data for flight {id} at {timestamp}")]
    SampleNotFound {
        /// The flight that was searched
        id: String,
        /// The requested timestamp
        timestamp: String,
    },

    /// Journal write or sync failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Journal contents are damaged beyond a torn tail
    #[error("corruption: {0}")]
    Corruption(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid engine configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// A required field is absent
    pub fn missing(field: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: "missing required field".to_string(),
        }
    }

    /// A field is present but unusable
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Coarse classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } | Error::AlreadyArchived { .. } => ErrorKind::Validation,
            Error::FlightNotFound { .. } | Error::SampleNotFound { .. } => ErrorKind::NotFound,
            Error::Storage(_) | Error::Corruption(_) | Error::Io(_) => ErrorKind::Storage,
            Error::Config(_) | Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Check if this is a not-found error of either flavor
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a caller error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
