//! Listing command handlers.

use crate::bridge::Engines;
use crate::{Output, Result};

/// Handle ListActive command
pub fn list_active(p: &Engines) -> Result<Output> {
    let active = p.query.list_active();
    Ok(Output::Active {
        count: active.len(),
        active,
    })
}

/// Handle ListLogs command
pub fn list_logs(p: &Engines, limit: Option<usize>) -> Result<Output> {
    let logs = p.query.list_archive(limit);
    Ok(Output::Logs {
        count: logs.len(),
        logs,
    })
}
