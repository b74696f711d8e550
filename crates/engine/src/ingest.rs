//! Ingestion engine
//!
//! Turns one validated telemetry sample into exactly one of:
//! - create or append on the active set
//! - append, then move the flight to the archive (terminal status)
//! - nothing (validation failure, rejected write for an archived flight)
//!
//! The journal entry is appended from inside the store's commit hook, under
//! the flight's guard and before any in-memory mutation. A failed append
//! leaves the stores untouched and surfaces as `Error::Storage`.

use crate::database::{Counters, Database};
use chrono::Utc;
use contrail_core::{Error, IngestOutcome, IngestRequest, Result, ValidatedIngest};
use contrail_storage::{JournalEntry, SampleWrite, WriteOutcome, WritePlan};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Write side of the engine
#[derive(Debug, Clone)]
pub struct IngestEngine {
    db: Arc<Database>,
}

impl IngestEngine {
    /// Create an engine over `db`
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Validate and apply one telemetry push
    #[tracing::instrument(level = "debug", skip(self, request), fields(id = ?request.id))]
    pub fn ingest(&self, request: &IngestRequest) -> Result<IngestOutcome> {
        self.db.ensure_open()?;
        let validated = request.validate().map_err(|e| {
            Counters::bump(&self.db.counters.rejected);
            warn!(target: "contrail::ingest", error = %e, "rejected telemetry");
            e
        })?;
        self.apply(validated)
    }

    /// Apply an already validated sample
    pub fn apply(&self, ingest: ValidatedIngest) -> Result<IngestOutcome> {
        self.db.ensure_open()?;
        let config = self.db.config();

        let ValidatedIngest { id, sample, status } = ingest;
        let status = status.unwrap_or_else(|| config.default_flight_status());
        let terminal = config.is_terminal(&status);
        let write = SampleWrite {
            id: id.clone(),
            sample,
            status,
            at: Utc::now(),
            terminal,
        };

        let journal = self.db.journal();
        let outcome = self.db.store().write(write, |_, write| match journal {
            Some(journal) => journal.append(&JournalEntry::from_write(write)),
            None => Ok(()),
        })?;

        let counters = &self.db.counters;
        match outcome {
            WriteOutcome::Applied {
                plan,
                archived,
                sample_count,
            } => {
                Counters::bump(&counters.ingests);
                let created = plan == WritePlan::Create;
                if archived {
                    Counters::bump(&counters.archivals);
                    info!(target: "contrail::ingest", %id, samples = sample_count, "flight archived");
                } else if created {
                    info!(target: "contrail::ingest", %id, "tracking new flight");
                } else {
                    debug!(target: "contrail::ingest", %id, samples = sample_count, "sample appended");
                }
                Ok(IngestOutcome {
                    id,
                    created,
                    archived,
                    sample_count,
                })
            }
            // Producer retry of the final push: report it as done.
            WriteOutcome::AlreadyArchived { sample_count } if terminal => {
                Counters::bump(&counters.ingests);
                debug!(target: "contrail::ingest", %id, "terminal retry for archived flight");
                Ok(IngestOutcome {
                    id,
                    created: false,
                    archived: true,
                    sample_count,
                })
            }
            WriteOutcome::AlreadyArchived { .. } => {
                Counters::bump(&counters.rejected);
                warn!(target: "contrail::ingest", %id, "telemetry for archived flight rejected");
                Err(Error::AlreadyArchived { id: id.into() })
            }
        }
    }

    /// The database this engine writes to
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}
