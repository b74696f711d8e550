//! Read-side views returned by the query engine
//!
//! Views are owned snapshots: once built they do not change even if the
//! underlying flight is updated or archived.

use crate::primitives::{ActiveFlight, ArchivedFlight, PositionSample};
use crate::types::{FlightId, FlightStatus};
use serde::{Deserialize, Serialize};

/// Full tracking view of one flight
///
/// For an archived flight `status` is `"completed"` and `current_position`
/// is `None`; the last sample of `history` is the final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingView {
    /// Flight id
    pub id: FlightId,
    /// Reported status
    pub status: FlightStatus,
    /// Latest sample, active flights only
    pub current_position: Option<PositionSample>,
    /// Every sample in arrival order
    pub history: Vec<PositionSample>,
    /// Number of samples
    pub total_updates: usize,
}

impl TrackingView {
    /// View of a live flight
    pub fn from_active(flight: &ActiveFlight) -> Self {
        Self {
            id: flight.id().clone(),
            status: flight.status().clone(),
            current_position: Some(flight.current_position().clone()),
            history: flight.history().to_vec(),
            total_updates: flight.sample_count(),
        }
    }

    /// View of an archived flight
    pub fn from_archived(flight: &ArchivedFlight) -> Self {
        Self {
            id: flight.id().clone(),
            status: FlightStatus::Completed,
            current_position: None,
            history: flight.history().to_vec(),
            total_updates: flight.sample_count(),
        }
    }

    /// Whether this view was served from the archive
    pub fn is_archived(&self) -> bool {
        self.current_position.is_none()
    }

    /// Most recent known position, for both live and archived flights
    pub fn last_position(&self) -> Option<&PositionSample> {
        self.current_position
            .as_ref()
            .or_else(|| self.history.last())
    }
}

/// A single historical sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSample {
    /// Flight id
    pub id: FlightId,
    /// The requested timestamp
    pub timestamp: String,
    /// The matching sample
    pub position: PositionSample,
}

/// Result of one ingest call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// Flight id
    pub id: FlightId,
    /// A new active record was created
    pub created: bool,
    /// The flight is archived after this call
    pub archived: bool,
    /// Samples recorded for the flight after this call
    pub sample_count: usize,
}

impl IngestOutcome {
    /// Human-readable summary, as reported by the boundary
    pub fn message(&self) -> &'static str {
        if self.archived {
            "Flight landed and moved to logs"
        } else {
            "Flight data ingested successfully"
        }
    }
}

/// Engine-wide counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Flights currently in the active set
    pub active_flights: usize,
    /// Flights in the archive
    pub archived_flights: usize,
    /// Samples held by active flights
    pub active_samples: usize,
    /// Successful ingest calls since open
    pub ingests: u64,
    /// Archive transitions since open
    pub archivals: u64,
    /// Rejected ingest calls since open
    pub rejected: u64,
}
