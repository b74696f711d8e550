//! Hybrid search across the active set and the archive
//!
//! Full scan of both collections, no auxiliary indices:
//!
//! 1. Active flights matching every criterion, sorted by id.
//! 2. When the status criterion is absent or `"completed"`, archived flights
//!    matching the id criterion, in archive order.
//!
//! The two scans are not one snapshot. A flight archived between them can
//! match both; the archive hit is dropped so each id is reported once.

use contrail_core::{SearchCriteria, SearchHit};
use contrail_storage::FlightStore;
use std::collections::HashSet;

/// Run `criteria` against `store`
pub fn hybrid_search(store: &FlightStore, criteria: &SearchCriteria) -> Vec<SearchHit> {
    let active = store
        .active()
        .scan(|flight| criteria.matches_active(flight));
    let mut hits: Vec<SearchHit> = active.iter().map(SearchHit::from_active).collect();

    if criteria.includes_archive() {
        let seen: HashSet<&str> = active.iter().map(|flight| flight.id().as_str()).collect();
        hits.extend(
            store
                .archive()
                .scan(|flight| criteria.matches_archived(flight))
                .iter()
                .filter(|flight| !seen.contains(flight.id().as_str()))
                .map(|flight| SearchHit::from_archived(flight)),
        );
    }

    hits
}
