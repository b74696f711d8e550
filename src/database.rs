//! Main entry point for Contrail.
//!
//! This module provides the `Contrail` struct, the handle for every
//! tracking operation.

use crate::error::{Error, Result};
use crate::types::{
    ActiveFlight, ArchivedFlight, DurabilityMode, EngineConfig, EngineStats, IngestOutcome,
    IngestRequest, PointSample, RecoveryReport, SearchCriteria, SearchHit, TimestampMatch,
    TrackingView,
};
use contrail_engine::{Database, DatabaseBuilder, IngestEngine, QueryEngine};
use std::path::Path;
use std::sync::Arc;

/// The Contrail tracking database.
///
/// Cheap to share: clone the handle or wrap it in an `Arc`; every method
/// takes `&self` and is safe to call from many threads.
///
/// # Example
///
/// ```ignore
/// use contrail::prelude::*;
///
/// let db = Contrail::open("./flights")?;
///
/// db.ingest(IngestRequest::new("PK301")
///     .position(31.52, 74.35, 35000.0, 450.0)
///     .timestamp("T1"))?;
/// db.ingest(IngestRequest::new("PK301")
///     .position(24.90, 67.16, 0.0, 0.0)
///     .timestamp("T2")
///     .status("landed"))?;
///
/// assert_eq!(db.logs(None).len(), 1);
/// db.close()?;
/// ```
#[derive(Debug, Clone)]
pub struct Contrail {
    inner: Arc<Database>,
    ingest: IngestEngine,
    query: QueryEngine,
}

impl Contrail {
    /// Open a journaled database in `path` with default settings.
    ///
    /// Existing journal content is replayed before this returns.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create an ephemeral database with no disk I/O.
    ///
    /// | Method | Disk Files | Recovery |
    /// |--------|------------|----------|
    /// | `Contrail::ephemeral()` | None | No |
    /// | `Contrail::open(path)` | User dir | Yes |
    pub fn ephemeral() -> Result<Self> {
        Self::builder().open()
    }

    /// Open with an explicit configuration.
    pub fn open_with_config(config: EngineConfig) -> Result<Self> {
        ContrailBuilder::with_config(config).open()
    }

    /// Open from `contrail.toml` (or `config_path`) plus `CONTRAIL_*`
    /// environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::open_with_config(EngineConfig::load(config_path)?)
    }

    /// Create a builder for database configuration.
    pub fn builder() -> ContrailBuilder {
        ContrailBuilder::new()
    }

    fn from_engine(db: Arc<Database>) -> Self {
        Self {
            ingest: IngestEngine::new(db.clone()),
            query: QueryEngine::new(db.clone()),
            inner: db,
        }
    }

    // =========================================================================
    // Telemetry
    // =========================================================================

    /// Record one telemetry sample.
    ///
    /// A sample whose status is the terminal status moves the flight to the
    /// archive in the same call.
    pub fn ingest(&self, request: IngestRequest) -> Result<IngestOutcome> {
        Ok(self.ingest.ingest(&request)?)
    }

    /// Record one telemetry sample from a JSON body.
    pub fn ingest_json(&self, body: &serde_json::Value) -> Result<IngestOutcome> {
        let request = IngestRequest::from_json(body)?;
        self.ingest(request)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current state and full trajectory of a flight, live or archived.
    pub fn track(&self, id: &str) -> Result<TrackingView> {
        Ok(self.query.track(id)?)
    }

    /// The first sample of a flight recorded at `timestamp`.
    pub fn track_at(&self, id: &str, timestamp: &str) -> Result<PointSample> {
        Ok(self.query.track_at(id, timestamp)?)
    }

    /// Every flight in the air, sorted by id.
    pub fn active(&self) -> Vec<ActiveFlight> {
        self.query.list_active()
    }

    /// Archived flights, oldest first.
    ///
    /// `None` uses the configured `archive_list_limit`.
    pub fn logs(&self, limit: Option<usize>) -> Vec<ArchivedFlight> {
        self.query.list_archive(limit)
    }

    /// Hybrid search: active matches by id, then archive matches.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<SearchHit> {
        self.query.search(criteria)
    }

    /// Collection sizes and counters.
    pub fn stats(&self) -> EngineStats {
        self.query.stats()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Force pending journal writes to disk.
    pub fn flush(&self) -> Result<()> {
        self.inner.flush().map_err(Error::from)
    }

    /// Write a shutdown checkpoint and flush.
    ///
    /// Further ingests fail; reads keep working. Calling it twice is fine.
    pub fn close(&self) -> Result<()> {
        self.inner.shutdown().map_err(Error::from)
    }

    /// Journal directory, `None` for ephemeral databases.
    pub fn path(&self) -> Option<&Path> {
        self.inner.data_dir()
    }

    /// Durability mode in effect.
    pub fn durability_mode(&self) -> DurabilityMode {
        self.inner.durability_mode()
    }

    /// Check if nothing is written to disk.
    pub fn is_ephemeral(&self) -> bool {
        self.inner.is_ephemeral()
    }

    /// What was replayed from the journal at open.
    pub fn recovery_report(&self) -> &RecoveryReport {
        self.inner.recovery_report()
    }

    /// Configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        self.inner.config()
    }

    /// The engine database, for the executor layer.
    pub fn database(&self) -> &Arc<Database> {
        &self.inner
    }
}

/// Builder for database configuration.
///
/// # Example
///
/// ```ignore
/// // Production: journaled, fsync every 1000 samples
/// let db = Contrail::builder().path("./flights").buffered().open()?;
///
/// // Tests: no disk at all
/// let db = Contrail::builder().terminal_status("arrived").open()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContrailBuilder {
    inner: DatabaseBuilder,
}

impl ContrailBuilder {
    /// Create a new builder with default settings (ephemeral).
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            inner: DatabaseBuilder::with_config(config),
        }
    }

    /// Keep a journal in `path`.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.inner = self.inner.path(path);
        self
    }

    /// Keep no journal even when a path is set.
    pub fn no_durability(mut self) -> Self {
        self.inner = self.inner.no_durability();
        self
    }

    /// fsync every 1000 appends and on `flush()` (default).
    pub fn buffered(mut self) -> Self {
        self.inner = self.inner.buffered();
        self
    }

    /// fsync every `batch_size` appends.
    pub fn buffered_with(mut self, batch_size: usize) -> Self {
        self.inner = self.inner.buffered_with(batch_size);
        self
    }

    /// fsync on every append.
    pub fn strict(mut self) -> Self {
        self.inner = self.inner.strict();
        self
    }

    /// Status that lands a flight (default `"landed"`).
    pub fn terminal_status(mut self, status: impl Into<String>) -> Self {
        self.inner = self.inner.terminal_status(status);
        self
    }

    /// Status for samples that carry none (default `"in_flight"`).
    pub fn default_status(mut self, status: impl Into<String>) -> Self {
        self.inner = self.inner.default_status(status);
        self
    }

    /// Archive listing size when no limit is given (default 50).
    pub fn archive_list_limit(mut self, limit: usize) -> Self {
        self.inner = self.inner.archive_list_limit(limit);
        self
    }

    /// How `track_at` compares timestamps.
    pub fn timestamp_match(mut self, mode: TimestampMatch) -> Self {
        self.inner = self.inner.timestamp_match(mode);
        self
    }

    /// Open the database, replaying the journal if there is one.
    pub fn open(self) -> Result<Contrail> {
        let db = Arc::new(self.inner.open()?);
        Ok(Contrail::from_engine(db))
    }
}
