//! Shared test utilities.

#![allow(dead_code)]

use contrail::prelude::*;

/// In-memory database
pub fn create_db() -> Contrail {
    Contrail::ephemeral().expect("Failed to create ephemeral database")
}

/// Non-terminal sample at a fixed position
pub fn sample(id: &str, ts: &str) -> IngestRequest {
    sample_at(id, ts, 35000.0, 450.0)
}

/// Non-terminal sample with the given altitude and speed
pub fn sample_at(id: &str, ts: &str, altitude: f64, speed: f64) -> IngestRequest {
    IngestRequest::new(id)
        .position(31.52, 74.35, altitude, speed)
        .timestamp(ts)
}

/// Terminal sample on the ground
pub fn landing(id: &str, ts: &str) -> IngestRequest {
    IngestRequest::new(id)
        .position(24.90, 67.16, 0.0, 0.0)
        .timestamp(ts)
        .status("landed")
}

/// Push `n` samples T1..Tn
pub fn fly(db: &Contrail, id: &str, n: usize) {
    for i in 1..=n {
        db.ingest(sample(id, &format!("T{}", i))).unwrap();
    }
}

/// Ids of a search result, in order
pub fn hit_ids(hits: &[SearchHit]) -> Vec<String> {
    hits.iter().map(|hit| hit.id.to_string()).collect()
}
