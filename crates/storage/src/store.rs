//! Guarded write path over the active set and the archive
//!
//! Every write for one flight id runs under that id's shard write guard:
//!
//! 1. Vacant slot: if the id is archived, stop with `AlreadyArchived`;
//!    otherwise create the active record.
//! 2. Occupied slot: append the sample, replace current position and status.
//! 3. Terminal status: move the record into the archive, then remove the
//!    active slot, still holding the guard.
//!
//! Because step 3 inserts into the archive before the slot is released, a
//! reader that checks the active set first and the archive second always
//! finds the flight in at least one of them.
//!
//! Lock order: active shard, then archive, then whatever `commit` takes.
//!
//! Without a journal, writes to ids in different shards never contend. With
//! one, `commit` appends under the journal mutex while the shard guard is
//! held, so journaled writes to all ids serialize on that append (and on its
//! fsync in strict mode), and readers of the same shard wait it out. That is
//! what keeps journal order equal to apply order for every id; batched
//! durability shortens the window to a buffered write.

use crate::archive::ArchiveStore;
use crate::sharded::ActiveStore;
use contrail_core::{
    ActiveFlight, ArchivedFlight, FlightId, FlightStatus, PositionSample, Result, Timestamp,
};
use dashmap::mapref::entry::Entry;
use tracing::debug;

/// One sample to apply
#[derive(Debug, Clone, PartialEq)]
pub struct SampleWrite {
    /// Target flight
    pub id: FlightId,
    /// The new sample
    pub sample: PositionSample,
    /// Resolved status
    pub status: FlightStatus,
    /// Server-side receive time
    pub at: Timestamp,
    /// Whether `status` is the terminal status
    pub terminal: bool,
}

/// What the write path decided to do, passed to the commit hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePlan {
    /// First sample for this id
    Create,
    /// Sample for an existing active flight
    Append,
}

/// Result of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The sample was recorded
    Applied {
        /// Create or append
        plan: WritePlan,
        /// The flight moved to the archive
        archived: bool,
        /// Samples for the flight after the write
        sample_count: usize,
    },
    /// The id is archived; nothing was written
    AlreadyArchived {
        /// Samples in the archived record
        sample_count: usize,
    },
}

impl WriteOutcome {
    /// Whether the sample was recorded
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied { .. })
    }
}

/// Active set plus archive
#[derive(Debug, Default)]
pub struct FlightStore {
    active: ActiveStore,
    archive: ArchiveStore,
}

impl FlightStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The active set
    pub fn active(&self) -> &ActiveStore {
        &self.active
    }

    /// The archive
    pub fn archive(&self) -> &ArchiveStore {
        &self.archive
    }

    /// Apply one sample
    ///
    /// `commit` runs under the flight's guard after the plan is known and
    /// before anything is mutated. If it fails the write is abandoned and
    /// the error returned; the stores are untouched. It is not called for
    /// `AlreadyArchived`.
    pub fn write<F>(&self, write: SampleWrite, commit: F) -> Result<WriteOutcome>
    where
        F: FnOnce(WritePlan, &SampleWrite) -> Result<()>,
    {
        match self.active.entry(write.id.clone()) {
            Entry::Vacant(slot) => {
                if let Some(record) = self.archive.get(write.id.as_str()) {
                    debug!(target: "contrail::store", id = %write.id, "write for archived flight");
                    return Ok(WriteOutcome::AlreadyArchived {
                        sample_count: record.sample_count(),
                    });
                }

                commit(WritePlan::Create, &write)?;

                let SampleWrite {
                    id,
                    sample,
                    status,
                    at,
                    terminal,
                } = write;
                let flight = ActiveFlight::new(id, sample, status, at);

                if terminal {
                    // Never enters the active set; the slot guard drops unused.
                    let record = ArchivedFlight::from_active(flight, at);
                    debug!(target: "contrail::store", id = %record.id(), "archived on first sample");
                    self.archive.insert(record);
                    Ok(WriteOutcome::Applied {
                        plan: WritePlan::Create,
                        archived: true,
                        sample_count: 1,
                    })
                } else {
                    slot.insert(flight);
                    Ok(WriteOutcome::Applied {
                        plan: WritePlan::Create,
                        archived: false,
                        sample_count: 1,
                    })
                }
            }
            Entry::Occupied(mut slot) => {
                commit(WritePlan::Append, &write)?;

                let SampleWrite {
                    sample,
                    status,
                    at,
                    terminal,
                    ..
                } = write;
                slot.get_mut().record(sample, status, at);
                let sample_count = slot.get().sample_count();

                if terminal {
                    // Archive first, then release the slot: the id must never
                    // be absent from both collections.
                    let record = ArchivedFlight::from_active(slot.get().clone(), at);
                    debug!(
                        target: "contrail::store",
                        id = %record.id(),
                        samples = sample_count,
                        "moved to archive"
                    );
                    self.archive.insert(record);
                    slot.remove();
                }

                Ok(WriteOutcome::Applied {
                    plan: WritePlan::Append,
                    archived: terminal,
                    sample_count,
                })
            }
        }
    }
}
