//! Database: the owner of all tracking state
//!
//! A `Database` holds the active set, the archive, the optional journal and
//! the configuration. The ingest and query engines are handed an
//! `Arc<Database>`; there is no process-wide state.
//!
//! # Opening
//!
//! | Method | Journal | Recovery |
//! |--------|---------|----------|
//! | `Database::ephemeral()` | None | No |
//! | `Database::open(path)` | `path/journal.wal` | Yes |
//! | `Database::builder()...open()` | per config | per config |

use crate::config::EngineConfig;
use crate::recovery::{self, RecoveryReport};
use contrail_core::{EngineStats, Error, Result};
use contrail_storage::{DurabilityMode, FlightStore, Journal, JournalEntry};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{info, warn};

/// Monotonic counters since open
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) ingests: AtomicU64,
    pub(crate) archivals: AtomicU64,
    pub(crate) rejected: AtomicU64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// The tracking database
pub struct Database {
    store: FlightStore,
    journal: Option<Journal>,
    config: EngineConfig,
    recovery: RecoveryReport,
    pub(crate) counters: Counters,
    shut_down: AtomicBool,
}

impl Database {
    /// In-memory database with default configuration
    pub fn ephemeral() -> Result<Self> {
        Self::builder().open()
    }

    /// Journaled database in `path` with default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create a builder
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Open with an explicit configuration
    pub fn open_with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let store = FlightStore::new();
        let (journal, recovery) = match (&config.data_dir, config.durability.requires_journal()) {
            (Some(dir), true) => {
                let (journal, recovered) = Journal::open(dir, config.durability)?;
                let report = recovery::replay(&store, recovered)?;
                (Some(journal), report)
            }
            _ => (None, RecoveryReport::default()),
        };

        info!(
            target: "contrail::db",
            data_dir = ?config.data_dir,
            durability = config.durability.description(),
            active = store.active().len(),
            archived = store.archive().len(),
            "database opened"
        );

        Ok(Self {
            store,
            journal,
            config,
            recovery,
            counters: Counters::default(),
            shut_down: AtomicBool::new(false),
        })
    }

    /// Active set and archive
    pub fn store(&self) -> &FlightStore {
        &self.store
    }

    /// Journal, when one is kept
    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    /// Configuration in effect
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// What was replayed at open
    pub fn recovery_report(&self) -> &RecoveryReport {
        &self.recovery
    }

    /// Data directory, when journaled
    pub fn data_dir(&self) -> Option<&Path> {
        self.journal
            .as_ref()
            .and_then(|_| self.config.data_dir.as_deref())
    }

    /// Durability mode in effect; `None` for ephemeral databases
    pub fn durability_mode(&self) -> DurabilityMode {
        self.journal
            .as_ref()
            .map_or(DurabilityMode::None, Journal::mode)
    }

    /// Check if nothing is written to disk
    pub fn is_ephemeral(&self) -> bool {
        self.journal.is_none()
    }

    /// Check if `shutdown` has not been called
    pub fn is_open(&self) -> bool {
        !self.shut_down.load(Ordering::Acquire)
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::Storage("database is shut down".into()))
        }
    }

    /// Collection sizes and counters
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            active_flights: self.store.active().len(),
            archived_flights: self.store.archive().len(),
            active_samples: self.store.active().sample_count(),
            ingests: self.counters.ingests.load(Ordering::Relaxed),
            archivals: self.counters.archivals.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
        }
    }

    /// fsync the journal
    pub fn flush(&self) -> Result<()> {
        match &self.journal {
            Some(journal) => journal.flush(),
            None => Ok(()),
        }
    }

    /// Write a checkpoint, flush, and refuse further ingests
    ///
    /// Calling it again is a no-op.
    pub fn shutdown(&self) -> Result<()> {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(journal) = &self.journal {
            journal.append(&JournalEntry::checkpoint(
                self.store.active().len(),
                self.store.archive().len(),
            ))?;
            journal.flush()?;
        }
        info!(target: "contrail::db", "database shut down");
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(target: "contrail::db", error = %e, "shutdown on drop failed");
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("store", &self.store)
            .field("journal", &self.journal)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Builder for [`Database`]
#[derive(Debug, Clone, Default)]
pub struct DatabaseBuilder {
    config: EngineConfig,
}

impl DatabaseBuilder {
    /// Builder with default configuration (ephemeral)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Keep a journal in `path`
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// No journal; all data is lost on drop
    pub fn no_durability(mut self) -> Self {
        self.config.durability = DurabilityMode::None;
        self
    }

    /// Batched fsync with the default batch size
    pub fn buffered(mut self) -> Self {
        self.config.durability = DurabilityMode::buffered_default();
        self
    }

    /// Batched fsync every `batch_size` appends
    pub fn buffered_with(mut self, batch_size: usize) -> Self {
        self.config.durability = DurabilityMode::Batched { batch_size };
        self
    }

    /// fsync on every append
    pub fn strict(mut self) -> Self {
        self.config.durability = DurabilityMode::Strict;
        self
    }

    /// Status that moves a flight to the archive
    pub fn terminal_status(mut self, status: impl Into<String>) -> Self {
        self.config.terminal_status = status.into();
        self
    }

    /// Status for samples that carry none
    pub fn default_status(mut self, status: impl Into<String>) -> Self {
        self.config.default_status = status.into();
        self
    }

    /// Default archive listing size
    pub fn archive_list_limit(mut self, limit: usize) -> Self {
        self.config.archive_list_limit = limit;
        self
    }

    /// Timestamp comparison for point lookups
    pub fn timestamp_match(mut self, mode: contrail_core::TimestampMatch) -> Self {
        self.config.timestamp_match = mode;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Data directory, if set
    pub fn data_dir(&self) -> Option<&PathBuf> {
        self.config.data_dir.as_ref()
    }

    /// Open the database
    pub fn open(self) -> Result<Database> {
        Database::open_with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ephemeral_has_no_journal() {
        let db = Database::ephemeral().unwrap();
        assert!(db.is_ephemeral());
        assert!(db.data_dir().is_none());
        assert_eq!(db.durability_mode(), DurabilityMode::None);
        assert_eq!(db.stats(), EngineStats::default());
    }

    #[test]
    fn test_open_creates_journal() {
        let dir = TempDir::new().unwrap();
        let db = Database::builder()
            .path(dir.path())
            .strict()
            .open()
            .unwrap();

        assert!(!db.is_ephemeral());
        assert_eq!(db.durability_mode(), DurabilityMode::Strict);
        assert_eq!(db.data_dir(), Some(dir.path()));
        assert!(dir.path().join("journal.wal").exists());
    }

    #[test]
    fn test_no_durability_with_path_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        let db = Database::builder()
            .path(&data)
            .no_durability()
            .open()
            .unwrap();

        assert!(db.is_ephemeral());
        assert!(!data.exists());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Database::builder()
            .archive_list_limit(0)
            .open()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Database::builder()
            .terminal_status("in_flight")
            .open()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let db = Database::builder()
            .path(dir.path())
            .strict()
            .open()
            .unwrap();

        db.shutdown().unwrap();
        db.shutdown().unwrap();
        assert!(!db.is_open());
        assert!(db.ensure_open().is_err());
        drop(db);

        let db = Database::open(dir.path()).unwrap();
        assert!(db.recovery_report().clean_shutdown);
        assert_eq!(db.recovery_report().checkpoints, 1);
    }

    #[test]
    fn test_flush_ephemeral_is_noop() {
        let db = Database::ephemeral().unwrap();
        db.flush().unwrap();
        db.shutdown().unwrap();
    }
}
