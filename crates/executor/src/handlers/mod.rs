//! Command handlers, one module per concern.
//!
//! Each handler takes the shared [`Engines`](crate::bridge::Engines), calls
//! into the engine, and shapes the result into an [`Output`](crate::Output).

pub(crate) mod db;
pub(crate) mod ingest;
pub(crate) mod listing;
pub(crate) mod search;
pub(crate) mod track;
