//! Journal entry types
//!
//! One entry per applied write. Rejected writes are never journaled, so
//! replaying the entries in order through the normal write path rebuilds
//! exactly the state that was acknowledged.

use crate::store::SampleWrite;
use contrail_core::{FlightId, FlightStatus, PositionSample, Timestamp};
use serde::{Deserialize, Serialize};

/// Journal format version written into checkpoints
pub const JOURNAL_VERSION: u32 = 1;

/// A journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JournalEntry {
    /// Non-terminal sample: create or append
    Upsert {
        /// Flight id
        id: FlightId,
        /// The sample
        sample: PositionSample,
        /// Resolved status
        status: FlightStatus,
        /// Receive time
        at: Timestamp,
    },

    /// Terminal sample: append, then move the flight to the archive
    Archive {
        /// Flight id
        id: FlightId,
        /// The final sample
        sample: PositionSample,
        /// Resolved (terminal) status
        status: FlightStatus,
        /// Receive time, becomes the archive time
        at: Timestamp,
    },

    /// Clean-shutdown marker with collection sizes at that point
    Checkpoint {
        /// Journal format version
        version: u32,
        /// Active flights at shutdown
        active: u64,
        /// Archived flights at shutdown
        archived: u64,
    },
}

impl JournalEntry {
    /// Entry recording `write`
    pub fn from_write(write: &SampleWrite) -> Self {
        let id = write.id.clone();
        let sample = write.sample.clone();
        let status = write.status.clone();
        let at = write.at;
        if write.terminal {
            JournalEntry::Archive {
                id,
                sample,
                status,
                at,
            }
        } else {
            JournalEntry::Upsert {
                id,
                sample,
                status,
                at,
            }
        }
    }

    /// Checkpoint with the current format version
    pub fn checkpoint(active: usize, archived: usize) -> Self {
        JournalEntry::Checkpoint {
            version: JOURNAL_VERSION,
            active: active as u64,
            archived: archived as u64,
        }
    }

    /// The write to replay, `None` for checkpoints
    pub fn into_write(self) -> Option<SampleWrite> {
        match self {
            JournalEntry::Upsert {
                id,
                sample,
                status,
                at,
            } => Some(SampleWrite {
                id,
                sample,
                status,
                at,
                terminal: false,
            }),
            JournalEntry::Archive {
                id,
                sample,
                status,
                at,
            } => Some(SampleWrite {
                id,
                sample,
                status,
                at,
                terminal: true,
            }),
            JournalEntry::Checkpoint { .. } => None,
        }
    }

    /// Flight this entry belongs to
    pub fn flight_id(&self) -> Option<&FlightId> {
        match self {
            JournalEntry::Upsert { id, .. } | JournalEntry::Archive { id, .. } => Some(id),
            JournalEntry::Checkpoint { .. } => None,
        }
    }

    /// Check if this is a checkpoint
    pub fn is_checkpoint(&self) -> bool {
        matches!(self, JournalEntry::Checkpoint { .. })
    }
}
