//! Track Tests
//!
//! Full tracking views and point-in-time lookups, live and archived.

use crate::common::*;
use contrail::prelude::*;

#[test]
fn test_track_unknown_flight() {
    let db = create_db();
    let err = db.track("XX000").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_track_archived_reports_completed() {
    let db = create_db();
    fly(&db, "PK999", 2);
    db.ingest(landing("PK999", "T3")).unwrap();

    let view = db.track("PK999").unwrap();
    assert_eq!(view.status, FlightStatus::Completed);
    assert!(view.current_position.is_none());
    assert_eq!(view.total_updates, 3);
    assert_eq!(view.last_position().unwrap().timestamp, "T3");
}

#[test]
fn test_track_at_returns_first_match() {
    let db = create_db();
    db.ingest(sample_at("PK301", "T1", 1000.0, 200.0)).unwrap();
    db.ingest(sample_at("PK301", "T1", 2000.0, 250.0)).unwrap();

    let point = db.track_at("PK301", "T1").unwrap();
    assert_eq!(point.id.as_str(), "PK301");
    assert_eq!(point.position.altitude, 1000.0);
}

#[test]
fn test_track_at_distinguishes_missing_sample() {
    let db = create_db();
    fly(&db, "PK301", 1);
    fly(&db, "EK542", 2);

    // T2 exists for EK542 only; never borrow another flight's sample.
    let err = db.track_at("PK301", "T2").unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("PK301 at T2"));

    let err = db.track_at("XX000", "T1").unwrap_err();
    assert_eq!(err.to_string(), "not found: flight XX000");
}

#[test]
fn test_track_at_archived_flight() {
    let db = create_db();
    fly(&db, "PK999", 1);
    db.ingest(landing("PK999", "T2")).unwrap();

    assert_eq!(
        db.track_at("PK999", "T1").unwrap().position.altitude,
        35000.0
    );
    assert_eq!(db.track_at("PK999", "T2").unwrap().position.altitude, 0.0);
}

#[test]
fn test_instant_matching_normalizes_offsets() {
    let db = Contrail::builder()
        .timestamp_match(TimestampMatch::Instant)
        .open()
        .unwrap();
    db.ingest(sample("PK301", "2024-01-01T10:00:00Z")).unwrap();

    let point = db.track_at("PK301", "2024-01-01T15:00:00+05:00").unwrap();
    assert_eq!(point.position.altitude, 35000.0);

    let exact = create_db();
    exact
        .ingest(sample("PK301", "2024-01-01T10:00:00Z"))
        .unwrap();
    assert!(exact
        .track_at("PK301", "2024-01-01T15:00:00+05:00")
        .is_err());
}

#[test]
fn test_views_are_snapshots() {
    let db = create_db();
    fly(&db, "PK301", 1);

    let before = db.track("PK301").unwrap();
    db.ingest(sample("PK301", "T2")).unwrap();

    assert_eq!(before.total_updates, 1);
    assert_eq!(db.track("PK301").unwrap().total_updates, 2);
}

#[test]
fn test_listings_are_idempotent() {
    let db = create_db();
    for id in ["TK1", "AA1", "EK1"] {
        fly(&db, id, 1);
    }
    db.ingest(landing("ZZ9", "T1")).unwrap();

    assert_eq!(db.active(), db.active());
    assert_eq!(db.logs(None), db.logs(None));
    let ids: Vec<String> = db.active().iter().map(|f| f.id().to_string()).collect();
    assert_eq!(ids, vec!["AA1", "EK1", "TK1"]);
}
