//! Ingest command handler.

use crate::bridge::Engines;
use crate::convert::convert_result;
use crate::{Output, Result};
use contrail_core::IngestRequest;

/// Handle Ingest command
pub fn ingest(p: &Engines, request: IngestRequest) -> Result<Output> {
    let outcome = convert_result(p.ingest.ingest(&request))?;
    Ok(Output::Ingested {
        message: outcome.message().to_string(),
        archived: outcome.archived,
        id: outcome.id,
    })
}
