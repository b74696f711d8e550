//! Hybrid search types
//!
//! A [`SearchCriteria`] combines a case-insensitive id substring, an exact
//! status, and inclusive altitude/speed ranges. Active flights are matched
//! against the conjunction of every supplied criterion. Archived flights carry
//! no live telemetry, so only the id criterion applies to them, and they are
//! scanned only when the status criterion is absent or `"completed"`.
//!
//! ## Query keys
//!
//! | key | field |
//! |-----|-------|
//! | `flight_number`, `id` | `id_contains` |
//! | `status` | `status` |
//! | `min_altitude`, `max_altitude` | altitude range |
//! | `min_speed`, `max_speed` | speed range |
//!
//! Unknown keys are ignored.

use crate::error::{Error, Result};
use crate::primitives::{ActiveFlight, ArchivedFlight, PositionSample};
use crate::types::{FlightId, FlightStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hybrid search predicates, all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the flight id
    #[serde(default)]
    pub id_contains: Option<String>,
    /// Exact status
    #[serde(default)]
    pub status: Option<String>,
    /// Inclusive lower altitude bound
    #[serde(default)]
    pub min_altitude: Option<f64>,
    /// Inclusive upper altitude bound
    #[serde(default)]
    pub max_altitude: Option<f64>,
    /// Inclusive lower speed bound
    #[serde(default)]
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound
    #[serde(default)]
    pub max_speed: Option<f64>,
}

impl SearchCriteria {
    /// Empty criteria, matching everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the id to contain `needle` (case-insensitive)
    pub fn id_contains(mut self, needle: impl Into<String>) -> Self {
        self.id_contains = Some(needle.into());
        self
    }

    /// Require an exact status
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Lower altitude bound
    pub fn min_altitude(mut self, value: f64) -> Self {
        self.min_altitude = Some(value);
        self
    }

    /// Upper altitude bound
    pub fn max_altitude(mut self, value: f64) -> Self {
        self.max_altitude = Some(value);
        self
    }

    /// Lower speed bound
    pub fn min_speed(mut self, value: f64) -> Self {
        self.min_speed = Some(value);
        self
    }

    /// Upper speed bound
    pub fn max_speed(mut self, value: f64) -> Self {
        self.max_speed = Some(value);
        self
    }

    /// Parse string key/value pairs, as found in a query string
    ///
    /// Numeric values that do not parse fail the whole call.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = SearchCriteria::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref();
            match key {
                "flight_number" | "id" => criteria.id_contains = Some(value.trim().to_string()),
                "status" => criteria.status = Some(value.to_string()),
                "min_altitude" => criteria.min_altitude = Some(parse_bound(key, value)?),
                "max_altitude" => criteria.max_altitude = Some(parse_bound(key, value)?),
                "min_speed" => criteria.min_speed = Some(parse_bound(key, value)?),
                "max_speed" => criteria.max_speed = Some(parse_bound(key, value)?),
                _ => {}
            }
        }
        Ok(criteria)
    }

    /// Render back to query pairs, the inverse of [`SearchCriteria::from_query_pairs`]
    pub fn to_query_pairs(&self) -> BTreeMap<String, String> {
        let mut pairs = BTreeMap::new();
        if let Some(id) = &self.id_contains {
            pairs.insert("flight_number".to_string(), id.clone());
        }
        if let Some(status) = &self.status {
            pairs.insert("status".to_string(), status.clone());
        }
        let bounds = [
            ("min_altitude", self.min_altitude),
            ("max_altitude", self.max_altitude),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
        ];
        for (key, bound) in bounds {
            if let Some(v) = bound {
                pairs.insert(key.to_string(), v.to_string());
            }
        }
        pairs
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &SearchCriteria::default()
    }

    /// Whether archived flights take part in this search
    pub fn includes_archive(&self) -> bool {
        match &self.status {
            None => true,
            Some(status) => status == FlightStatus::COMPLETED,
        }
    }

    /// Conjunction of every criterion against a live flight
    pub fn matches_active(&self, flight: &ActiveFlight) -> bool {
        if !self.matches_id(flight.id()) {
            return false;
        }
        if let Some(status) = &self.status {
            if !flight.status().is(status) {
                return false;
            }
        }
        let position = flight.current_position();
        in_range(position.altitude, self.min_altitude, self.max_altitude)
            && in_range(position.speed, self.min_speed, self.max_speed)
    }

    /// Id criterion only; archived flights have no live telemetry
    pub fn matches_archived(&self, flight: &ArchivedFlight) -> bool {
        self.matches_id(flight.id())
    }

    fn matches_id(&self, id: &FlightId) -> bool {
        match &self.id_contains {
            Some(needle) => id.contains_lowercase(&needle.trim().to_lowercase()),
            None => true,
        }
    }
}

fn parse_bound(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::invalid(key, format!("invalid numeric value '{}'", raw)))
}

fn in_range(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
}

/// Which store a hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitSource {
    /// The active set
    Active,
    /// The archive
    Archive,
}

/// One search result
///
/// Archived hits report status `"completed"` and no current position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Flight id
    pub id: FlightId,
    /// Reported status
    pub status: FlightStatus,
    /// Store the hit came from
    pub source: HitSource,
    /// Latest sample, active hits only
    pub current_position: Option<PositionSample>,
    /// Recorded samples in arrival order
    pub history: Vec<PositionSample>,
    /// Number of recorded samples
    pub total_updates: usize,
}

impl SearchHit {
    /// Hit from the active set
    pub fn from_active(flight: &ActiveFlight) -> Self {
        Self {
            id: flight.id().clone(),
            status: flight.status().clone(),
            source: HitSource::Active,
            current_position: Some(flight.current_position().clone()),
            history: flight.history().to_vec(),
            total_updates: flight.sample_count(),
        }
    }

    /// Hit from the archive
    pub fn from_archived(flight: &ArchivedFlight) -> Self {
        Self {
            id: flight.id().clone(),
            status: FlightStatus::Completed,
            source: HitSource::Archive,
            current_position: None,
            history: flight.history().to_vec(),
            total_updates: flight.sample_count(),
        }
    }
}
