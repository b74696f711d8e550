//! Hybrid Search Tests
//!
//! Active flights match on every criterion; archived flights on the id
//! criterion only, and only when the status filter allows completed flights.

use crate::common::*;
use contrail::prelude::*;

fn scenario() -> Contrail {
    let db = create_db();
    db.ingest(sample_at("PK301", "T1", 35000.0, 450.0)).unwrap();
    db.ingest(sample_at("EK542", "T1", 12000.0, 300.0)).unwrap();
    db.ingest(sample_at("PK456", "T1", 38000.0, 480.0).status("holding"))
        .unwrap();
    db.ingest(sample_at("PK999", "T1", 36000.0, 460.0)).unwrap();
    db.ingest(landing("PK999", "T2")).unwrap();
    db
}

#[test]
fn test_empty_criteria_returns_everything() {
    let db = scenario();
    let hits = db.search(&SearchCriteria::new());
    assert_eq!(hit_ids(&hits), vec!["EK542", "PK301", "PK456", "PK999"]);
    assert_eq!(hits[3].source, HitSource::Archive);
}

#[test]
fn test_id_substring_spans_both_stores() {
    let db = scenario();
    let hits = db.search(&SearchCriteria::new().id_contains("pk"));

    assert_eq!(hit_ids(&hits), vec!["PK301", "PK456", "PK999"]);
    let archived = &hits[2];
    assert_eq!(archived.status, FlightStatus::Completed);
    assert!(archived.current_position.is_none());
    assert_eq!(archived.total_updates, 2);
}

#[test]
fn test_altitude_range_is_inclusive_and_skips_archive_telemetry() {
    let db = scenario();
    let hits = db.search(
        &SearchCriteria::new()
            .min_altitude(30000.0)
            .max_altitude(38000.0),
    );

    // PK999's last altitude is 0, but archived flights match on id only.
    assert_eq!(hit_ids(&hits), vec!["PK301", "PK456", "PK999"]);
}

#[test]
fn test_speed_and_status() {
    let db = scenario();

    let hits = db.search(&SearchCriteria::new().min_speed(400.0).status("in_flight"));
    assert_eq!(hit_ids(&hits), vec!["PK301"]);

    let hits = db.search(&SearchCriteria::new().status("holding"));
    assert_eq!(hit_ids(&hits), vec!["PK456"]);
}

#[test]
fn test_completed_status_searches_archive_only() {
    let db = scenario();
    let hits = db.search(&SearchCriteria::new().status("completed"));
    assert_eq!(hit_ids(&hits), vec!["PK999"]);
}

#[test]
fn test_no_matches() {
    let db = scenario();
    assert!(db
        .search(&SearchCriteria::new().id_contains("QR"))
        .is_empty());
    assert!(create_db().search(&SearchCriteria::new()).is_empty());
}
