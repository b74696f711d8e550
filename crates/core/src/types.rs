//! Identifier and marker types
//!
//! - [`FlightId`]: non-empty identifier of a tracked flight
//! - [`FlightStatus`]: status string attached to each ingest
//! - [`TimestampMatch`]: how point-in-time lookups compare timestamps

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Wall-clock instant used for record bookkeeping
pub type Timestamp = DateTime<Utc>;

/// Unique identifier of a tracked flight
///
/// Primary key in both the active store and the archive. Never empty.
///
/// # Examples
///
/// ```
/// use contrail_core::FlightId;
///
/// let id = FlightId::new("PK301").unwrap();
/// assert_eq!(id.as_str(), "PK301");
/// assert!(FlightId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlightId(String);

impl FlightId {
    /// Create a flight id, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::invalid("id", "must not be empty"));
        }
        Ok(FlightId(id))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test
    ///
    /// `needle` must already be lowercased.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FlightId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FlightId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FlightId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        FlightId::new(value)
    }
}

impl TryFrom<&str> for FlightId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        FlightId::new(value)
    }
}

impl From<FlightId> for String {
    fn from(id: FlightId) -> Self {
        id.0
    }
}

/// Status attached to a flight
///
/// Statuses are caller-supplied strings. The well-known values get their own
/// variants; anything else is carried verbatim in [`FlightStatus::Other`].
/// Which status is terminal is decided by engine configuration, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlightStatus {
    /// `"in_flight"`, the default for pushes without a status
    #[default]
    InFlight,
    /// `"landed"`, the default terminal marker
    Landed,
    /// `"completed"`, reported for every archived flight
    Completed,
    /// Any other caller-supplied status
    Other(String),
}

impl FlightStatus {
    /// Wire value of [`FlightStatus::InFlight`]
    pub const IN_FLIGHT: &'static str = "in_flight";
    /// Wire value of [`FlightStatus::Landed`]
    pub const LANDED: &'static str = "landed";
    /// Wire value of [`FlightStatus::Completed`]
    pub const COMPLETED: &'static str = "completed";

    /// Parse a status string
    pub fn parse(value: &str) -> Self {
        match value {
            Self::IN_FLIGHT => FlightStatus::InFlight,
            Self::LANDED => FlightStatus::Landed,
            Self::COMPLETED => FlightStatus::Completed,
            other => FlightStatus::Other(other.to_string()),
        }
    }

    /// The wire value of this status
    pub fn as_str(&self) -> &str {
        match self {
            FlightStatus::InFlight => Self::IN_FLIGHT,
            FlightStatus::Landed => Self::LANDED,
            FlightStatus::Completed => Self::COMPLETED,
            FlightStatus::Other(s) => s,
        }
    }

    /// Exact comparison against a marker string
    pub fn is(&self, marker: &str) -> bool {
        self.as_str() == marker
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FlightStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::IN_FLIGHT | Self::LANDED | Self::COMPLETED => FlightStatus::parse(&value),
            _ => FlightStatus::Other(value),
        }
    }
}

impl From<&str> for FlightStatus {
    fn from(value: &str) -> Self {
        FlightStatus::parse(value)
    }
}

impl From<FlightStatus> for String {
    fn from(status: FlightStatus) -> Self {
        match status {
            FlightStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// How a point-in-time lookup compares a stored timestamp with the request
///
/// Stored timestamps are opaque strings; `Exact` compares them byte for byte.
/// `Instant` parses both sides (RFC 3339, or ISO 8601 without offset read as
/// UTC) and compares the instants, falling back to exact equality when either
/// side does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMatch {
    /// Exact string equality
    #[default]
    Exact,
    /// Parsed-instant equality
    Instant,
}

impl TimestampMatch {
    /// Does `recorded` satisfy a lookup for `requested`?
    pub fn matches(&self, recorded: &str, requested: &str) -> bool {
        match self {
            TimestampMatch::Exact => recorded == requested,
            TimestampMatch::Instant => match (parse_instant(recorded), parse_instant(requested)) {
                (Some(a), Some(b)) => a == b,
                _ => recorded == requested,
            },
        }
    }
}

fn parse_instant(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
