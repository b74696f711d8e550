//! Active and archived flight records
//!
//! ## Lifecycle
//!
//! ```text
//! first sample ──► ActiveFlight ──(sample)──► ActiveFlight ... ──(terminal)──► ArchivedFlight
//! ```
//!
//! An [`ActiveFlight`] is created on the first sample for an unseen id and
//! mutated on every later sample. When the terminal status arrives its
//! history is moved into an [`ArchivedFlight`], which is never mutated again.
//!
//! ## Invariants
//!
//! - `history` is never empty
//! - `current_position == history.last()`
//! - history order is arrival order
//!
//! Fields are private so the invariants can only be changed through
//! [`ActiveFlight::record`].

use super::position::{first_at, PositionSample};
use crate::types::{FlightId, FlightStatus, Timestamp, TimestampMatch};
use serde::Serialize;

/// Live state of a flight in the active set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveFlight {
    id: FlightId,
    status: FlightStatus,
    current_position: PositionSample,
    history: Vec<PositionSample>,
    created_at: Timestamp,
    last_update: Timestamp,
}

impl ActiveFlight {
    /// Create a flight from its first sample
    pub fn new(id: FlightId, first: PositionSample, status: FlightStatus, at: Timestamp) -> Self {
        Self {
            id,
            status,
            current_position: first.clone(),
            history: vec![first],
            created_at: at,
            last_update: at,
        }
    }

    /// Append a sample and make it the current position
    pub fn record(&mut self, sample: PositionSample, status: FlightStatus, at: Timestamp) {
        self.current_position = sample.clone();
        self.history.push(sample);
        self.status = status;
        self.last_update = at;
    }

    /// Flight id
    pub fn id(&self) -> &FlightId {
        &self.id
    }

    /// Status from the most recent ingest
    pub fn status(&self) -> &FlightStatus {
        &self.status
    }

    /// Latest sample
    pub fn current_position(&self) -> &PositionSample {
        &self.current_position
    }

    /// All samples in arrival order
    pub fn history(&self) -> &[PositionSample] {
        &self.history
    }

    /// When the first sample arrived
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the latest sample arrived
    pub fn last_update(&self) -> Timestamp {
        self.last_update
    }

    /// Number of recorded samples
    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    /// First sample recorded at `timestamp`
    pub fn position_at(&self, timestamp: &str, mode: TimestampMatch) -> Option<&PositionSample> {
        first_at(&self.history, timestamp, mode)
    }
}

/// Finalized trajectory of a flight that reached its terminal status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchivedFlight {
    id: FlightId,
    history: Vec<PositionSample>,
    started_at: Timestamp,
    ended_at: Timestamp,
    sample_count: usize,
}

impl ArchivedFlight {
    /// Seal an active flight
    ///
    /// Consumes the live record; its history moves into the archive record.
    pub fn from_active(flight: ActiveFlight, ended_at: Timestamp) -> Self {
        Self {
            sample_count: flight.history.len(),
            id: flight.id,
            history: flight.history,
            started_at: flight.created_at,
            ended_at,
        }
    }

    /// Flight id
    pub fn id(&self) -> &FlightId {
        &self.id
    }

    /// All samples in arrival order
    pub fn history(&self) -> &[PositionSample] {
        &self.history
    }

    /// When the flight was first seen
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// When the flight was archived
    pub fn ended_at(&self) -> Timestamp {
        self.ended_at
    }

    /// Number of samples at archive time
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Final recorded sample
    pub fn last_position(&self) -> Option<&PositionSample> {
        self.history.last()
    }

    /// First sample recorded at `timestamp`
    pub fn position_at(&self, timestamp: &str, mode: TimestampMatch) -> Option<&PositionSample> {
        first_at(&self.history, timestamp, mode)
    }
}
