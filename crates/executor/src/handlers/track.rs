//! Track command handler.

use crate::bridge::Engines;
use crate::convert::convert_result;
use crate::{ApiError, Output, Result};

/// Handle Track command: full view, or one sample when a timestamp is given
///
/// An empty timestamp counts as absent.
pub fn track(p: &Engines, id: String, timestamp: Option<String>) -> Result<Output> {
    if id.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: "id".into(),
            reason: "missing required field".into(),
        });
    }

    match timestamp.filter(|ts| !ts.is_empty()) {
        Some(ts) => Ok(Output::Sample(convert_result(p.query.track_at(&id, &ts))?)),
        None => Ok(Output::Tracking(convert_result(p.query.track(&id))?)),
    }
}
