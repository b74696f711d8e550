//! Commands accepted by the executor.

use contrail_core::IngestRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One operation against the tracking engine
///
/// JSON form is externally tagged: `{"Track": {"id": "PK301"}}`, `"Ping"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Record one telemetry sample
    Ingest(IngestRequest),

    /// Current state of a flight, or one sample when `timestamp` is given
    Track {
        /// Flight id
        id: String,
        /// Producer timestamp to look up
        #[serde(default)]
        timestamp: Option<String>,
    },

    /// Every active flight
    ListActive,

    /// Archived flights, oldest first
    ListLogs {
        /// Maximum number of records; engine default when absent
        #[serde(default)]
        limit: Option<usize>,
    },

    /// Hybrid search with string criteria as received from the caller
    Search {
        /// `flight_number`/`id`, `status`, `min_altitude`, `max_altitude`,
        /// `min_speed`, `max_speed`
        #[serde(default)]
        criteria: BTreeMap<String, String>,
    },

    /// Engine counters
    Stats,

    /// Liveness check
    Ping,
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ingest(_) => "Ingest",
            Command::Track { .. } => "Track",
            Command::ListActive => "ListActive",
            Command::ListLogs { .. } => "ListLogs",
            Command::Search { .. } => "Search",
            Command::Stats => "Stats",
            Command::Ping => "Ping",
        }
    }

    /// Whether the command can change engine state
    pub fn is_write(&self) -> bool {
        matches!(self, Command::Ingest(_))
    }
}
