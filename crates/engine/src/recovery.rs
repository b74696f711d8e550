//! Journal replay
//!
//! Entries go back through [`FlightStore::write`] with a no-op commit, so
//! replay follows exactly the create/append/archive rules of live ingest.
//! An entry for an id that is already archived is skipped; this is how a
//! duplicated archive entry converges to a single archive record.

use contrail_core::Result;
use contrail_storage::{FlightStore, Recovered, WriteOutcome};
use serde::Serialize;
use tracing::{debug, info};

/// Summary of what an open replayed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecoveryReport {
    /// Entries applied to the stores
    pub replayed: usize,
    /// Entries skipped because their flight was already archived
    pub skipped: usize,
    /// Shutdown checkpoints seen
    pub checkpoints: usize,
    /// The previous session ended with a checkpoint
    pub clean_shutdown: bool,
    /// Bytes of torn tail dropped from the journal
    pub truncated_bytes: u64,
}

impl RecoveryReport {
    /// Whether anything was read back
    pub fn is_empty(&self) -> bool {
        self.replayed == 0 && self.skipped == 0 && self.checkpoints == 0
    }
}

/// Rebuild `store` from recovered journal entries
pub(crate) fn replay(store: &FlightStore, recovered: Recovered) -> Result<RecoveryReport> {
    let mut report = RecoveryReport {
        clean_shutdown: recovered.clean_shutdown,
        truncated_bytes: recovered.truncated_bytes,
        ..RecoveryReport::default()
    };

    for entry in recovered.entries {
        let Some(write) = entry.into_write() else {
            report.checkpoints += 1;
            continue;
        };
        match store.write(write, |_, _| Ok(()))? {
            WriteOutcome::Applied { .. } => report.replayed += 1,
            WriteOutcome::AlreadyArchived { .. } => {
                debug!(target: "contrail::recovery", "skipping entry for archived flight");
                report.skipped += 1;
            }
        }
    }

    info!(
        target: "contrail::recovery",
        replayed = report.replayed,
        skipped = report.skipped,
        active = store.active().len(),
        archived = store.archive().len(),
        clean = report.clean_shutdown,
        "journal replayed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contrail_core::{FlightId, FlightStatus, PositionSample};
    use contrail_storage::JournalEntry;

    fn upsert(id: &str, ts: &str) -> JournalEntry {
        JournalEntry::Upsert {
            id: FlightId::new(id).unwrap(),
            sample: PositionSample::new(1.0, 1.0, 1.0, 1.0, ts),
            status: FlightStatus::InFlight,
            at: Utc::now(),
        }
    }

    fn archive(id: &str, ts: &str) -> JournalEntry {
        JournalEntry::Archive {
            id: FlightId::new(id).unwrap(),
            sample: PositionSample::new(1.0, 1.0, 0.0, 0.0, ts),
            status: FlightStatus::Landed,
            at: Utc::now(),
        }
    }

    #[test]
    fn test_replay_rebuilds_both_collections() {
        let store = FlightStore::new();
        let recovered = Recovered {
            entries: vec![
                upsert("PK301", "T1"),
                upsert("PK456", "T1"),
                upsert("PK301", "T2"),
                archive("PK301", "T3"),
            ],
            clean_shutdown: false,
            truncated_bytes: 0,
        };

        let report = replay(&store, recovered).unwrap();
        assert_eq!(report.replayed, 4);
        assert_eq!(report.skipped, 0);

        assert!(!store.active().contains("PK301"));
        assert_eq!(store.archive().get("PK301").unwrap().sample_count(), 3);
        assert_eq!(store.active().get("PK456").unwrap().sample_count(), 1);
    }

    #[test]
    fn test_duplicate_archive_entry_converges() {
        let store = FlightStore::new();
        let recovered = Recovered {
            entries: vec![
                upsert("PK999", "T1"),
                archive("PK999", "T2"),
                archive("PK999", "T2"),
                JournalEntry::checkpoint(0, 1),
            ],
            clean_shutdown: true,
            truncated_bytes: 0,
        };

        let report = replay(&store, recovered).unwrap();
        assert_eq!(report.replayed, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.checkpoints, 1);
        assert!(report.clean_shutdown);

        assert_eq!(store.archive().len(), 1);
        assert_eq!(store.archive().get("PK999").unwrap().sample_count(), 2);
        assert!(store.active().is_empty());
    }

    #[test]
    fn test_empty_journal() {
        let store = FlightStore::new();
        let report = replay(&store, Recovered::default()).unwrap();
        assert!(report.is_empty());
    }
}
