//! # Contrail
//!
//! Embedded flight telemetry tracking engine.
//!
//! Producers push position samples per flight; Contrail keeps a live
//! trajectory for every flight in the air and moves a flight into an
//! immutable archive when its terminal status arrives.
//!
//! ## Quick Start
//!
//! ```ignore
//! use contrail::prelude::*;
//!
//! let db = Contrail::open("./flights")?;
//!
//! db.ingest(
//!     IngestRequest::new("PK301")
//!         .position(31.52, 74.35, 35000.0, 450.0)
//!         .timestamp("2024-01-01T10:00:00Z"),
//! )?;
//!
//! let view = db.track("PK301")?;
//! let hits = db.search(&SearchCriteria::new().id_contains("PK"));
//!
//! db.close()?;
//! ```
//!
//! ## Opening
//!
//! | Method | Journal | Recovery |
//! |--------|---------|----------|
//! | [`Contrail::ephemeral`] | None | No |
//! | [`Contrail::open`] | `path/journal.wal` | Yes |
//! | [`Contrail::load`] | per `contrail.toml` and environment | per config |
//! | [`Contrail::builder`] | per builder | per builder |

#![warn(missing_docs)]

mod database;
mod error;
mod types;

pub mod prelude;

pub use database::{Contrail, ContrailBuilder};
pub use error::{Error, Result};

pub use types::*;
