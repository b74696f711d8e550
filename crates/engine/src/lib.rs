//! Tracking engine for Contrail
//!
//! This crate ties the storage layer into a database:
//! - Database / DatabaseBuilder: owns the stores, journal, and configuration
//! - EngineConfig: terminal status, list limits, timestamp matching, durability
//! - IngestEngine: validate, journal, apply, archive
//! - QueryEngine: track, point lookups, listings, hybrid search
//! - recovery: journal replay at open

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod database;
pub mod ingest;
pub mod query;
pub mod recovery;
pub mod search;

pub use config::{EngineConfig, CONFIG_FILE};
pub use database::{Database, DatabaseBuilder};
pub use ingest::IngestEngine;
pub use query::QueryEngine;
pub use recovery::RecoveryReport;
pub use search::hybrid_search;

pub use contrail_storage::DurabilityMode;
