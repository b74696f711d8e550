//! Durability Tests
//!
//! Journal replay across close and reopen.

use crate::common::*;
use contrail::prelude::*;
use std::fs::OpenOptions;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let db = Contrail::open(dir.path()).unwrap();
        fly(&db, "PK301", 2);
        fly(&db, "EK542", 1);
        db.ingest(landing("PK301", "T3")).unwrap();
        db.close().unwrap();
    }

    let db = Contrail::open(dir.path()).unwrap();
    assert!(db.recovery_report().clean_shutdown);
    assert_eq!(db.recovery_report().replayed, 4);

    assert_eq!(db.active().len(), 1);
    assert_eq!(db.track("EK542").unwrap().total_updates, 1);

    let archived = db.track("PK301").unwrap();
    assert_eq!(archived.status, FlightStatus::Completed);
    assert_eq!(archived.total_updates, 3);

    let err = db.ingest(sample("PK301", "T4")).unwrap_err();
    assert!(err.is_archived());
}

#[test]
fn test_strict_mode_survives_unclean_exit() {
    let dir = TempDir::new().unwrap();
    {
        let db = Contrail::builder()
            .path(dir.path())
            .strict()
            .open()
            .unwrap();
        fly(&db, "PK301", 3);
        // Skip the shutdown checkpoint.
        std::mem::forget(db);
    }

    let db = Contrail::open(dir.path()).unwrap();
    assert!(!db.recovery_report().clean_shutdown);
    assert_eq!(db.track("PK301").unwrap().total_updates, 3);
}

#[test]
fn test_torn_tail_discarded() {
    let dir = TempDir::new().unwrap();
    {
        let db = Contrail::builder()
            .path(dir.path())
            .strict()
            .open()
            .unwrap();
        fly(&db, "PK301", 2);
        std::mem::forget(db);
    }

    // A frame header promising more bytes than follow.
    let mut file = OpenOptions::new()
        .append(true)
        .open(dir.path().join("journal.wal"))
        .unwrap();
    file.write_all(&[0x40, 0, 0, 0, 1, 2, 3, 4, 9, 9]).unwrap();
    drop(file);

    let db = Contrail::open(dir.path()).unwrap();
    assert_eq!(db.recovery_report().truncated_bytes, 10);
    assert_eq!(db.track("PK301").unwrap().total_updates, 2);

    // The journal is writable again after truncation.
    db.ingest(sample("PK301", "T3")).unwrap();
    db.close().unwrap();
    drop(db);

    let db = Contrail::open(dir.path()).unwrap();
    assert_eq!(db.track("PK301").unwrap().total_updates, 3);
}

#[test]
fn test_ephemeral_writes_nothing() {
    let db = Contrail::ephemeral().unwrap();
    fly(&db, "PK301", 1);
    assert!(db.path().is_none());
    assert_eq!(db.durability_mode(), DurabilityMode::None);
}

#[test]
fn test_close_refuses_ingest_but_serves_reads() {
    let dir = TempDir::new().unwrap();
    let db = Contrail::open(dir.path()).unwrap();
    fly(&db, "PK301", 1);
    db.close().unwrap();
    db.close().unwrap();

    assert!(db.ingest(sample("PK301", "T2")).is_err());
    assert_eq!(db.track("PK301").unwrap().total_updates, 1);
}

#[test]
fn test_config_file_drives_open() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("contrail.toml");
    let data = dir.path().join("data");
    std::fs::write(
        &config_path,
        format!(
            "terminal_status = \"arrived\"\ndata_dir = {:?}\ndurability = {{ mode = \"strict\" }}\n",
            data.to_string_lossy()
        ),
    )
    .unwrap();

    let config = EngineConfig::from_file(&config_path).unwrap();
    let db = Contrail::open_with_config(config).unwrap();
    assert_eq!(db.durability_mode(), DurabilityMode::Strict);
    assert_eq!(db.path(), Some(data.as_path()));

    let outcome = db.ingest(sample("EK1", "T1").status("arrived")).unwrap();
    assert!(outcome.archived);
}
