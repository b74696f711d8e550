//! Core types for Contrail
//!
//! This crate defines the flight tracking domain shared by every other crate:
//! - [`FlightId`], [`FlightStatus`], [`TimestampMatch`]: identifiers and markers
//! - [`PositionSample`], [`ActiveFlight`], [`ArchivedFlight`]: the data model
//! - [`IngestRequest`]: a telemetry push, validated once at the boundary
//! - [`SearchCriteria`]: hybrid search predicates
//! - [`Error`] and [`ApiError`]: error taxonomy and its wire representation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api_error;
pub mod error;
pub mod primitives;
pub mod request;
pub mod search_types;
pub mod types;
pub mod views;

pub use api_error::{ApiError, WireError};
pub use error::{Error, ErrorKind, Result};
pub use primitives::{ActiveFlight, ArchivedFlight, PositionSample};
pub use request::{IngestRequest, NumericField, ValidatedIngest};
pub use search_types::{HitSource, SearchCriteria, SearchHit};
pub use types::{FlightId, FlightStatus, Timestamp, TimestampMatch};
pub use views::{EngineStats, IngestOutcome, PointSample, TrackingView};
