//! Ingest Tests
//!
//! Create-or-append semantics and request validation.

use crate::common::*;
use contrail::prelude::*;

// =============================================================================
// CREATE / APPEND
// =============================================================================

#[test]
fn test_first_sample_creates_flight() {
    let db = create_db();

    let outcome = db.ingest(sample("PK301", "T1")).unwrap();
    assert!(outcome.created);
    assert!(!outcome.archived);
    assert_eq!(outcome.message(), "Flight data ingested successfully");

    let active = db.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status(), &FlightStatus::InFlight);
}

#[test]
fn test_history_keeps_arrival_order() {
    let db = create_db();
    for ts in ["T3", "T1", "T2"] {
        db.ingest(sample("PK301", ts)).unwrap();
    }

    let view = db.track("PK301").unwrap();
    let order: Vec<&str> = view.history.iter().map(|s| s.timestamp.as_str()).collect();
    assert_eq!(order, vec!["T3", "T1", "T2"]);
    assert_eq!(view.current_position.unwrap().timestamp, "T2");
    assert_eq!(view.total_updates, 3);
}

#[test]
fn test_status_follows_latest_sample() {
    let db = create_db();
    db.ingest(sample("PK301", "T1").status("boarding")).unwrap();
    db.ingest(sample("PK301", "T2").status("taxiing")).unwrap();

    assert_eq!(db.track("PK301").unwrap().status.as_str(), "taxiing");
}

#[test]
fn test_flights_are_independent() {
    let db = create_db();
    fly(&db, "PK301", 3);
    fly(&db, "EK542", 1);

    assert_eq!(db.track("PK301").unwrap().total_updates, 3);
    assert_eq!(db.track("EK542").unwrap().total_updates, 1);
    assert_eq!(db.stats().active_samples, 4);
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_missing_fields_rejected() {
    let db = create_db();

    let err = db
        .ingest(IngestRequest::new("PK301").timestamp("T1"))
        .unwrap_err();
    assert!(err.is_invalid_input());

    let err = db
        .ingest(IngestRequest::new("PK301").position(1.0, 1.0, 1.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "timestamp"));

    assert!(db.active().is_empty());
    assert_eq!(db.stats().rejected, 2);
}

#[test]
fn test_numeric_strings_accepted() {
    let db = create_db();
    let outcome = db
        .ingest_json(&serde_json::json!({
            "flight_number": "PK301",
            "latitude": "31.52",
            "longitude": "74.35",
            "altitude": "35000",
            "speed": "450",
            "heading": "270",
            "timestamp": "T1"
        }))
        .unwrap();
    assert!(outcome.created);

    let view = db.track("PK301").unwrap();
    let position = view.current_position.unwrap();
    assert_eq!(position.altitude, 35000.0);
    assert_eq!(position.heading, 270.0);
}

#[test]
fn test_non_numeric_rejected() {
    let db = create_db();
    let err = db
        .ingest_json(&serde_json::json!({
            "flight_number": "PK301",
            "latitude": "north",
            "longitude": 74.35,
            "altitude": 35000,
            "speed": 450,
            "timestamp": "T1"
        }))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "latitude"));
    assert!(db.active().is_empty());
}

// =============================================================================
// PROPERTIES
// =============================================================================

mod properties {
    use crate::common::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn history_is_every_push_in_order(
            stamps in prop::collection::vec("[A-Z0-9:]{1,8}", 1..40)
        ) {
            let db = create_db();
            for ts in &stamps {
                db.ingest(sample("PK301", ts)).unwrap();
            }

            let view = db.track("PK301").unwrap();
            let recorded: Vec<String> =
                view.history.iter().map(|s| s.timestamp.clone()).collect();
            prop_assert_eq!(&recorded, &stamps);
            prop_assert_eq!(view.total_updates, stamps.len());
            prop_assert_eq!(
                &view.current_position.unwrap().timestamp,
                stamps.last().unwrap()
            );
        }
    }
}
