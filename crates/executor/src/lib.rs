//! Command execution layer for Contrail
//!
//! The transport boundary of the engine: every operation is a serializable
//! [`Command`], every result an [`Output`], every failure an [`ApiError`]
//! with a canonical code and an HTTP-equivalent status. Any front end (the
//! CLI, an HTTP layer) only needs [`Executor::execute`].
//!
//! [`Tracker`] wraps the executor with typed methods for Rust callers.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bridge;
mod command;
mod convert;
mod executor;
mod handlers;
mod output;
mod tracker;


pub use command::Command;
pub use executor::Executor;
pub use output::Output;
pub use tracker::Tracker;

pub use contrail_core::{ApiError, WireError};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, ApiError>;
