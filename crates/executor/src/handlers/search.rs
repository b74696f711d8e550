//! Search command handler.
//!
//! Handles hybrid search over active and archived flights.

use std::collections::BTreeMap;

use contrail_core::SearchCriteria;

use crate::bridge::Engines;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Message reported with every successful search
pub const SEARCH_MESSAGE: &str = "Hybrid search completed successfully";

/// Handle Search command
///
/// Criteria arrive as strings; a numeric bound that does not parse fails the
/// whole call. The raw criteria are echoed back.
pub fn search(p: &Engines, criteria: BTreeMap<String, String>) -> Result<Output> {
    let parsed = convert_result(SearchCriteria::from_query_pairs(
        criteria.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    ))?;

    let results = p.query.search(&parsed);
    Ok(Output::SearchResults {
        count: results.len(),
        results,
        criteria,
        message: SEARCH_MESSAGE.to_string(),
    })
}
