//! Sharded active store
//!
//! Holds the live record of every flight that has not reached its terminal
//! status.
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, readers only take a shard read lock
//! - FxHash: fast non-crypto hash over flight ids
//! - Per-flight entry guard: every mutation of one flight runs under the
//!   write guard of its shard, so mutations of one id are linearized while
//!   ids in other shards proceed in parallel
//!
//! # Thread Safety
//!
//! - get(): clones the whole record under a shard read lock, so a reader
//!   never sees `current_position` and `history` from different writes
//! - entry(): write guard on one shard, held by [`crate::FlightStore`] for the
//!   whole create/append/archive sequence
//!
//! Never call back into the store while holding an entry guard: DashMap
//! shard locks are not reentrant.

use contrail_core::{ActiveFlight, FlightId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

pub(crate) type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Write guard over one flight's slot
pub(crate) type ActiveEntry<'a> = Entry<'a, FlightId, ActiveFlight, FxBuildHasher>;

/// Active set, keyed by flight id
pub struct ActiveStore {
    flights: DashMap<FlightId, ActiveFlight, FxBuildHasher>,
}

impl ActiveStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            flights: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Create with expected number of concurrent flights
    pub fn with_capacity(flights: usize) -> Self {
        Self {
            flights: DashMap::with_capacity_and_hasher(flights, FxBuildHasher::default()),
        }
    }

    /// Snapshot of one flight
    #[inline]
    pub fn get(&self, id: &str) -> Option<ActiveFlight> {
        self.flights.get(id).map(|flight| flight.value().clone())
    }

    /// Check if a flight is active
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.flights.contains_key(id)
    }

    /// Number of active flights
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Check if no flight is active
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Total samples held across all active flights
    pub fn sample_count(&self) -> usize {
        self.flights
            .iter()
            .map(|entry| entry.value().sample_count())
            .sum()
    }

    /// Snapshot of every active flight, sorted by id
    ///
    /// Sorting makes repeated listings identical when nothing was written in
    /// between; DashMap iteration order is not stable across resizes.
    pub fn snapshot(&self) -> Vec<ActiveFlight> {
        self.scan(|_| true)
    }

    /// Snapshot of active flights matching `predicate`, sorted by id
    ///
    /// NOTE: O(n) over all flights. Each shard is read-locked only while it
    /// is visited.
    pub fn scan<F>(&self, predicate: F) -> Vec<ActiveFlight>
    where
        F: Fn(&ActiveFlight) -> bool,
    {
        let mut results: Vec<ActiveFlight> = self
            .flights
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        results.sort_by(|a, b| a.id().cmp(b.id()));
        results
    }

    /// Lock one flight's slot for writing
    pub(crate) fn entry(&self, id: FlightId) -> ActiveEntry<'_> {
        self.flights.entry(id)
    }
}

impl Default for ActiveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActiveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveStore")
            .field("flights", &self.len())
            .finish()
    }
}
