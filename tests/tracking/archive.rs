//! Archive Tests
//!
//! The landing transition and the immutability of archived flights.

use crate::common::*;
use contrail::prelude::*;

#[test]
fn test_landing_moves_flight_to_archive() {
    let db = create_db();
    fly(&db, "PK301", 2);

    let outcome = db.ingest(landing("PK301", "T3")).unwrap();
    assert!(outcome.archived);
    assert_eq!(outcome.sample_count, 3);
    assert_eq!(outcome.message(), "Flight landed and moved to logs");

    assert!(db.active().is_empty());
    let logs = db.logs(None);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id().as_str(), "PK301");
    assert_eq!(logs[0].sample_count(), 3);
    assert_eq!(logs[0].last_position().unwrap().timestamp, "T3");
}

#[test]
fn test_landing_on_first_sample() {
    let db = create_db();
    let outcome = db.ingest(landing("PK999", "T1")).unwrap();

    assert!(outcome.created);
    assert!(outcome.archived);
    assert_eq!(db.logs(None)[0].sample_count(), 1);
}

#[test]
fn test_telemetry_after_landing_rejected() {
    let db = create_db();
    fly(&db, "PK301", 1);
    db.ingest(landing("PK301", "T2")).unwrap();

    let err = db.ingest(sample("PK301", "T3")).unwrap_err();
    assert!(err.is_archived());

    assert!(db.active().is_empty());
    assert_eq!(db.logs(None)[0].sample_count(), 2);
}

#[test]
fn test_repeated_landing_is_noop() {
    let db = create_db();
    db.ingest(landing("PK999", "T1")).unwrap();

    let retry = db.ingest(landing("PK999", "T1")).unwrap();
    assert!(retry.archived);
    assert_eq!(db.logs(None).len(), 1);
    assert_eq!(db.logs(None)[0].sample_count(), 1);
    assert_eq!(db.stats().archivals, 1);
}

#[test]
fn test_logs_oldest_first_with_limit() {
    let db = Contrail::builder().archive_list_limit(2).open().unwrap();
    for id in ["C3", "A1", "B2"] {
        db.ingest(landing(id, "T1")).unwrap();
    }

    let ids: Vec<String> = db.logs(None).iter().map(|f| f.id().to_string()).collect();
    assert_eq!(ids, vec!["C3", "A1"]);
    assert_eq!(db.logs(Some(10)).len(), 3);
}

#[test]
fn test_custom_terminal_status() {
    let db = Contrail::builder()
        .terminal_status("arrived")
        .open()
        .unwrap();

    let outcome = db.ingest(landing("EK1", "T1")).unwrap();
    assert!(!outcome.archived);

    let outcome = db.ingest(sample("EK1", "T2").status("arrived")).unwrap();
    assert!(outcome.archived);
}

#[test]
fn test_stats_track_transitions() {
    let db = create_db();
    fly(&db, "PK301", 2);
    fly(&db, "EK542", 1);
    db.ingest(landing("PK301", "T3")).unwrap();
    let _ = db.ingest(IngestRequest::new("BAD"));

    let stats = db.stats();
    assert_eq!(stats.active_flights, 1);
    assert_eq!(stats.archived_flights, 1);
    assert_eq!(stats.active_samples, 1);
    assert_eq!(stats.ingests, 4);
    assert_eq!(stats.archivals, 1);
    assert_eq!(stats.rejected, 1);
}

#[test]
fn test_pk301_lifecycle() {
    let db = create_db();

    let first = db
        .ingest(
            IngestRequest::new("PK301")
                .position(31.52, 74.35, 1000.0, 150.0)
                .timestamp("T0"),
        )
        .unwrap();
    assert!(first.created);
    assert_eq!(db.track("PK301").unwrap().history.len(), 1);

    db.ingest(
        IngestRequest::new("PK301")
            .position(31.60, 74.40, 35000.0, 480.0)
            .timestamp("T1")
            .status("in_flight"),
    )
    .unwrap();
    let view = db.track("PK301").unwrap();
    assert_eq!(view.history.len(), 2);
    assert_eq!(view.current_position.unwrap().altitude, 35000.0);

    db.ingest(landing("PK301", "T2")).unwrap();
    assert!(db.active().iter().all(|f| f.id().as_str() != "PK301"));
    let logs = db.logs(None);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].sample_count(), 3);
}
