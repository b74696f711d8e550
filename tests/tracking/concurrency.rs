//! Concurrency Tests
//!
//! Many producers and readers against one database:
//! - Concurrent producers on distinct flights
//! - Concurrent producers on one flight
//! - Readers during landing transitions

use crate::common::*;
use contrail::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_producers_distinct_flights() {
    let db = Arc::new(create_db());

    const NUM_PRODUCERS: usize = 8;
    const SAMPLES_PER_FLIGHT: usize = 50;

    let barrier = Arc::new(Barrier::new(NUM_PRODUCERS));
    let handles: Vec<_> = (0..NUM_PRODUCERS)
        .map(|i| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();

                let id = format!("FL{}", i);
                for j in 0..SAMPLES_PER_FLIGHT {
                    db.ingest(sample(&id, &format!("T{}", j))).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(db.active().len(), NUM_PRODUCERS);
    for i in 0..NUM_PRODUCERS {
        let view = db.track(&format!("FL{}", i)).unwrap();
        let order: Vec<String> = view.history.iter().map(|s| s.timestamp.clone()).collect();
        let expected: Vec<String> = (0..SAMPLES_PER_FLIGHT).map(|j| format!("T{}", j)).collect();
        assert_eq!(order, expected);
    }
}

#[test]
fn test_concurrent_producers_one_flight_lose_nothing() {
    let db = Arc::new(create_db());

    const NUM_PRODUCERS: usize = 8;
    const SAMPLES_PER_PRODUCER: usize = 100;

    let barrier = Arc::new(Barrier::new(NUM_PRODUCERS));
    let handles: Vec<_> = (0..NUM_PRODUCERS)
        .map(|i| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for j in 0..SAMPLES_PER_PRODUCER {
                    db.ingest(sample("PK301", &format!("P{}-{}", i, j)))
                        .unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let view = db.track("PK301").unwrap();
    assert_eq!(view.total_updates, NUM_PRODUCERS * SAMPLES_PER_PRODUCER);

    // Each producer's own samples stay in its send order.
    for i in 0..NUM_PRODUCERS {
        let prefix = format!("P{}-", i);
        let mine: Vec<usize> = view
            .history
            .iter()
            .filter_map(|s| s.timestamp.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(mine, (0..SAMPLES_PER_PRODUCER).collect::<Vec<_>>());
    }
}

#[test]
fn test_flight_always_visible_while_landing() {
    let db = Arc::new(create_db());

    const FLIGHTS: usize = 200;
    for i in 0..FLIGHTS {
        db.ingest(sample(&format!("FL{}", i), "T1")).unwrap();
    }

    let barrier = Arc::new(Barrier::new(2));

    let writer = {
        let db = Arc::clone(&db);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..FLIGHTS {
                db.ingest(landing(&format!("FL{}", i), "T2")).unwrap();
            }
        })
    };

    let reader = {
        let db = Arc::clone(&db);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..5 {
                for i in 0..FLIGHTS {
                    let view = db.track(&format!("FL{}", i)).unwrap();
                    assert!(view.total_updates >= 1);
                }
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    let stats = db.stats();
    assert_eq!(stats.active_flights, 0);
    assert_eq!(stats.archived_flights, FLIGHTS);
}

#[test]
fn test_concurrent_terminal_pushes_archive_once() {
    let db = Arc::new(create_db());
    fly(&db, "PK999", 3);

    const RACERS: usize = 8;
    let barrier = Arc::new(Barrier::new(RACERS));
    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                db.ingest(landing("PK999", "T4")).unwrap()
            })
        })
        .collect();

    let outcomes: Vec<IngestOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outcomes.iter().all(|o| o.archived));

    let logs = db.logs(None);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].sample_count(), 4);
    assert_eq!(db.stats().archivals, 1);
}
