//! Query engine
//!
//! Read side: every lookup checks the active set first, then the archive.
//! Results are owned snapshots and never block writers beyond a shard read
//! lock.

use crate::database::Database;
use crate::search::hybrid_search;
use contrail_core::{
    ActiveFlight, ArchivedFlight, EngineStats, Error, PointSample, Result, SearchCriteria,
    SearchHit, TrackingView,
};
use std::sync::Arc;

/// Read side of the engine
#[derive(Debug, Clone)]
pub struct QueryEngine {
    db: Arc<Database>,
}

impl QueryEngine {
    /// Create an engine over `db`
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Current state and full trajectory of one flight
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn track(&self, id: &str) -> Result<TrackingView> {
        let store = self.db.store();
        if let Some(flight) = store.active().get(id) {
            return Ok(TrackingView::from_active(&flight));
        }
        store
            .archive()
            .get(id)
            .map(|flight| TrackingView::from_archived(&flight))
            .ok_or_else(|| Error::FlightNotFound { id: id.to_string() })
    }

    /// First sample of one flight recorded at `timestamp`
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn track_at(&self, id: &str, timestamp: &str) -> Result<PointSample> {
        let store = self.db.store();
        let mode = self.db.config().timestamp_match;

        let found = if let Some(flight) = store.active().get(id) {
            flight
                .position_at(timestamp, mode)
                .map(|position| (flight.id().clone(), position.clone()))
        } else if let Some(flight) = store.archive().get(id) {
            flight
                .position_at(timestamp, mode)
                .map(|position| (flight.id().clone(), position.clone()))
        } else {
            return Err(Error::FlightNotFound { id: id.to_string() });
        };

        found
            .map(|(id, position)| PointSample {
                id,
                timestamp: timestamp.to_string(),
                position,
            })
            .ok_or_else(|| Error::SampleNotFound {
                id: id.to_string(),
                timestamp: timestamp.to_string(),
            })
    }

    /// Every active flight, sorted by id
    pub fn list_active(&self) -> Vec<ActiveFlight> {
        self.db.store().active().snapshot()
    }

    /// Archived flights, oldest first
    ///
    /// `None` uses the configured `archive_list_limit`.
    pub fn list_archive(&self, limit: Option<usize>) -> Vec<ArchivedFlight> {
        let limit = limit.unwrap_or(self.db.config().archive_list_limit);
        self.db
            .store()
            .archive()
            .list(limit)
            .iter()
            .map(|flight| ArchivedFlight::clone(flight))
            .collect()
    }

    /// Hybrid search over both collections
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<SearchHit> {
        hybrid_search(self.db.store(), criteria)
    }

    /// Collection sizes and counters
    pub fn stats(&self) -> EngineStats {
        self.db.stats()
    }

    /// The database this engine reads from
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}
