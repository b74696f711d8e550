//! Storage layer for Contrail
//!
//! This crate implements the two logical collections and their journal:
//! - ActiveStore: DashMap sharded by flight id, one live record per flight
//! - ArchiveStore: append-only, insertion-ordered, upsert-by-id
//! - FlightStore: the guarded write path, including the active→archive move
//! - Journal: write-ahead log of applied writes, CRC-framed, replayable
//! - DurabilityMode: when journal appends reach the disk

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod format;
pub mod sharded;
pub mod store;
pub mod wal;

pub use archive::ArchiveStore;
pub use sharded::ActiveStore;
pub use store::{FlightStore, SampleWrite, WriteOutcome, WritePlan};
pub use wal::{DurabilityMode, Journal, JournalEntry, Recovered};
