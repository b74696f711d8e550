//! Archive store
//!
//! Finalized trajectories of flights that reached their terminal status.
//! Records are never mutated after insertion and are shared out as `Arc`s,
//! so a listing never copies histories.
//!
//! Insertion is upsert-by-id: a second insert for an archived id is a no-op.
//! Journal replay relies on this to converge when an archive entry is seen
//! twice.

use contrail_core::{ArchivedFlight, FlightId};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Default)]
struct ArchiveInner {
    /// Records in insertion order
    records: Vec<Arc<ArchivedFlight>>,
    /// Flight id -> position in `records`
    index: FxHashMap<FlightId, usize>,
}

/// Insertion-ordered collection of archived flights
#[derive(Default)]
pub struct ArchiveStore {
    inner: RwLock<ArchiveInner>,
}

impl ArchiveStore {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a finalized record
    ///
    /// Returns false, dropping `record`, if the id is already archived.
    pub fn insert(&self, record: ArchivedFlight) -> bool {
        let mut inner = self.inner.write();
        if inner.index.contains_key(record.id()) {
            return false;
        }
        let position = inner.records.len();
        inner.index.insert(record.id().clone(), position);
        inner.records.push(Arc::new(record));
        true
    }

    /// Look up one archived flight
    pub fn get(&self, id: &str) -> Option<Arc<ArchivedFlight>> {
        let inner = self.inner.read();
        inner
            .index
            .get(id)
            .map(|&position| Arc::clone(&inner.records[position]))
    }

    /// Check if a flight is archived
    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().index.contains_key(id)
    }

    /// Number of archived flights
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Check if the archive is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First `limit` records, oldest first
    pub fn list(&self, limit: usize) -> Vec<Arc<ArchivedFlight>> {
        self.inner
            .read()
            .records
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Records matching `predicate`, oldest first
    pub fn scan<F>(&self, predicate: F) -> Vec<Arc<ArchivedFlight>>
    where
        F: Fn(&ArchivedFlight) -> bool,
    {
        self.inner
            .read()
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for ArchiveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveStore")
            .field("flights", &self.len())
            .finish()
    }
}
