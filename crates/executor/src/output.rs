//! Results returned by the executor.
//!
//! Outputs serialize untagged, so the JSON of each variant is exactly the
//! response body a client sees.

use contrail_core::{
    ActiveFlight, ArchivedFlight, EngineStats, FlightId, PointSample, SearchHit, TrackingView,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Successful result of a [`crate::Command`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Telemetry recorded
    Ingested {
        /// Human-readable summary
        message: String,
        /// Flight id
        id: FlightId,
        /// The flight is archived after this call
        archived: bool,
    },

    /// Full tracking view
    Tracking(TrackingView),

    /// One historical sample
    Sample(PointSample),

    /// Active flights sorted by id
    Active {
        /// The flights
        active: Vec<ActiveFlight>,
        /// Number of flights
        count: usize,
    },

    /// Archived flights, oldest first
    Logs {
        /// The records
        logs: Vec<ArchivedFlight>,
        /// Number of records
        count: usize,
    },

    /// Hybrid search results
    SearchResults {
        /// Active hits by id, then archive hits
        results: Vec<SearchHit>,
        /// Number of hits
        count: usize,
        /// The criteria as received
        criteria: BTreeMap<String, String>,
        /// Human-readable summary
        message: String,
    },

    /// Engine counters
    Stats(EngineStats),

    /// Liveness reply
    Pong {
        /// Engine version
        version: String,
    },
}
