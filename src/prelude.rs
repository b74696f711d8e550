//! Convenient imports for Contrail.
//!
//! ```ignore
//! use contrail::prelude::*;
//!
//! let db = Contrail::ephemeral()?;
//! ```

// Main entry point
pub use crate::database::{Contrail, ContrailBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Requests and views
pub use crate::types::{
    ActiveFlight, ArchivedFlight, EngineStats, FlightId, FlightStatus, HitSource, IngestOutcome,
    IngestRequest, PointSample, PositionSample, SearchCriteria, SearchHit, TrackingView,
};

// Configuration
pub use crate::types::{DurabilityMode, EngineConfig, TimestampMatch};
