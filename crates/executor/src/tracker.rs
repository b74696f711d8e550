//! High-level typed wrapper for the Executor.
//!
//! [`Tracker`] wraps the [`Executor`] and the [`Command`]/[`Output`] enums
//! with typed method calls. Each method builds the command, executes it, and
//! unpacks the expected output variant.
//!
//! # Example
//!
//! ```ignore
//! use contrail_executor::Tracker;
//! use contrail_core::IngestRequest;
//!
//! let tracker = Tracker::new(db);
//! tracker.ingest(IngestRequest::new("PK301").position(31.5, 74.3, 35000.0, 450.0).timestamp("T1"))?;
//! let view = tracker.track("PK301")?;
//! ```

use std::sync::Arc;

use contrail_core::{
    ActiveFlight, ArchivedFlight, EngineStats, IngestRequest, PointSample, SearchCriteria,
    SearchHit, TrackingView,
};
use contrail_engine::Database;

use crate::{ApiError, Command, Executor, Output, Result};

/// Typed access to the tracking engine through the command boundary
pub struct Tracker {
    executor: Executor,
}

fn unexpected(command: &str) -> ApiError {
    ApiError::Internal {
        message: format!("Unexpected output for {}", command),
    }
}

impl Tracker {
    /// Create a tracker over `db`
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Ping the engine, returning its version
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(unexpected("Ping")),
        }
    }

    /// Record a sample; returns the message and whether the flight is archived
    pub fn ingest(&self, request: IngestRequest) -> Result<(String, bool)> {
        match self.executor.execute(Command::Ingest(request))? {
            Output::Ingested {
                message, archived, ..
            } => Ok((message, archived)),
            _ => Err(unexpected("Ingest")),
        }
    }

    /// Full tracking view of a flight
    pub fn track(&self, id: &str) -> Result<TrackingView> {
        match self.executor.execute(Command::Track {
            id: id.to_string(),
            timestamp: None,
        })? {
            Output::Tracking(view) => Ok(view),
            _ => Err(unexpected("Track")),
        }
    }

    /// One sample of a flight by timestamp
    pub fn track_at(&self, id: &str, timestamp: &str) -> Result<PointSample> {
        match self.executor.execute(Command::Track {
            id: id.to_string(),
            timestamp: Some(timestamp.to_string()),
        })? {
            Output::Sample(sample) => Ok(sample),
            _ => Err(unexpected("Track")),
        }
    }

    /// Active flights sorted by id
    pub fn active(&self) -> Result<Vec<ActiveFlight>> {
        match self.executor.execute(Command::ListActive)? {
            Output::Active { active, .. } => Ok(active),
            _ => Err(unexpected("ListActive")),
        }
    }

    /// Archived flights, oldest first
    pub fn logs(&self, limit: Option<usize>) -> Result<Vec<ArchivedFlight>> {
        match self.executor.execute(Command::ListLogs { limit })? {
            Output::Logs { logs, .. } => Ok(logs),
            _ => Err(unexpected("ListLogs")),
        }
    }

    /// Hybrid search
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<SearchHit>> {
        match self.executor.execute(Command::Search {
            criteria: criteria.to_query_pairs(),
        })? {
            Output::SearchResults { results, .. } => Ok(results),
            _ => Err(unexpected("Search")),
        }
    }

    /// Engine counters
    pub fn stats(&self) -> Result<EngineStats> {
        match self.executor.execute(Command::Stats)? {
            Output::Stats(stats) => Ok(stats),
            _ => Err(unexpected("Stats")),
        }
    }
}
