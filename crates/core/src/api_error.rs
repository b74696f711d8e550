//! API-level error types for wire encoding
//!
//! This module defines the `ApiError` enum for the transport boundary and the
//! `WireError` struct it encodes to.
//!
//! ## Wire Format
//!
//! All errors encode to JSON as:
//! ```json
//! {
//!   "code": "SampleNotFound",
//!   "message": "No position data for flight PK301 at T9",
//!   "status": 404,
//!   "details": {"id": "PK301", "timestamp": "T9"}
//! }
//! ```
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Status | Description |
//! |------|--------|-------------|
//! | ValidationError | 400 | Missing or malformed input |
//! | AlreadyArchived | 409 | Telemetry for a flight that already landed |
//! | FlightNotFound | 404 | Unknown flight id |
//! | SampleNotFound | 404 | Flight known, no sample at the timestamp |
//! | StorageError | 500 | Persistence failed |
//! | Internal | 500 | Bug or invariant violation |

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Wire error representation for JSON encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    /// The canonical error code (e.g., "ValidationError", "FlightNotFound")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// HTTP-equivalent status
    pub status: u16,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// API-level error type for the transport boundary
///
/// Each variant maps to one of the canonical error codes.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Missing or malformed field
    ValidationError {
        /// Offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Non-terminal telemetry for an archived flight
    AlreadyArchived {
        /// The archived flight
        id: String,
    },

    /// Unknown flight
    FlightNotFound {
        /// The flight id
        id: String,
    },

    /// Known flight, no sample at the timestamp
    SampleNotFound {
        /// The flight id
        id: String,
        /// The requested timestamp
        timestamp: String,
    },

    /// Storage error
    StorageError {
        /// Error message
        message: String,
    },

    /// Internal error (bug or invariant violation)
    Internal {
        /// Error message
        message: String,
    },
}

impl ApiError {
    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "ValidationError",
            ApiError::AlreadyArchived { .. } => "AlreadyArchived",
            ApiError::FlightNotFound { .. } => "FlightNotFound",
            ApiError::SampleNotFound { .. } => "SampleNotFound",
            ApiError::StorageError { .. } => "StorageError",
            ApiError::Internal { .. } => "Internal",
        }
    }

    /// HTTP-equivalent status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::AlreadyArchived { .. } => 409,
            ApiError::FlightNotFound { .. } | ApiError::SampleNotFound { .. } => 404,
            ApiError::StorageError { .. } | ApiError::Internal { .. } => 500,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            ApiError::ValidationError { field, reason } => {
                if reason == "missing required field" {
                    format!("Missing required field: {}", field)
                } else {
                    format!("Invalid value for {}: {}", field, reason)
                }
            }
            ApiError::AlreadyArchived { id } => {
                format!("Flight {} has landed and is archived", id)
            }
            ApiError::FlightNotFound { id } => format!("Flight not found: {}", id),
            ApiError::SampleNotFound { id, timestamp } => {
                format!("No position data for flight {} at {}", id, timestamp)
            }
            ApiError::StorageError { message } => format!("Storage error: {}", message),
            ApiError::Internal { message } => format!("Internal error: {}", message),
        }
    }

    /// Convert to wire error format
    pub fn to_wire_error(&self) -> WireError {
        WireError {
            code: self.error_code().to_string(),
            message: self.message(),
            status: self.status_code(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            ApiError::ValidationError { field, reason } => {
                Some(json!({"field": field, "reason": reason}))
            }
            ApiError::AlreadyArchived { id } | ApiError::FlightNotFound { id } => {
                Some(json!({"id": id}))
            }
            ApiError::SampleNotFound { id, timestamp } => {
                Some(json!({"id": id, "timestamp": timestamp}))
            }
            ApiError::StorageError { .. } | ApiError::Internal { .. } => None,
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::Validation { field, reason } => ApiError::ValidationError { field, reason },
            Error::AlreadyArchived { id } => ApiError::AlreadyArchived { id },
            Error::FlightNotFound { id } => ApiError::FlightNotFound { id },
            Error::SampleNotFound { id, timestamp } => ApiError::SampleNotFound { id, timestamp },
            Error::Storage(message) => ApiError::StorageError { message },
            Error::Corruption(msg) => ApiError::StorageError {
                message: format!("corruption: {}", msg),
            },
            Error::Io(io) => ApiError::StorageError {
                message: io.to_string(),
            },
            Error::Config(message) | Error::Internal(message) => ApiError::Internal { message },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}
