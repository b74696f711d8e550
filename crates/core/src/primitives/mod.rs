//! Primitive types for Contrail
//!
//! This module defines the canonical data structures of the tracking domain.
//! These types are shared between the `storage` and `engine` crates.
//!
//! ## Design Principle
//!
//! - **contrail-core** defines canonical semantic types (this module)
//! - **contrail-storage** owns the maps and the journal that hold them
//! - **contrail-engine** orchestrates ingestion, archival and queries
//!
//! All crates share the same type definitions from core.

pub mod flight;
pub mod position;

// Re-export all types at module level
pub use flight::{ActiveFlight, ArchivedFlight};
pub use position::PositionSample;
