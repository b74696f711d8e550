//! Database-level command handlers.

use crate::bridge::Engines;
use crate::{Output, Result};

/// Handle Ping command
pub fn ping(_p: &Engines) -> Result<Output> {
    Ok(Output::Pong {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle Stats command
pub fn stats(p: &Engines) -> Result<Output> {
    Ok(Output::Stats(p.db.stats()))
}
