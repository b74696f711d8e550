//! Public types for the Contrail API.
//!
//! Re-exported from the internal crates so callers depend on `contrail` only.

// Identifiers and markers
pub use contrail_core::{FlightId, FlightStatus, Timestamp, TimestampMatch};

// Data model
pub use contrail_core::{ActiveFlight, ArchivedFlight, PositionSample};

// Requests
pub use contrail_core::{IngestRequest, NumericField};

// Search
pub use contrail_core::{HitSource, SearchCriteria, SearchHit};

// Views
pub use contrail_core::{EngineStats, IngestOutcome, PointSample, TrackingView};

// Configuration and recovery
pub use contrail_engine::{DurabilityMode, EngineConfig, RecoveryReport};
