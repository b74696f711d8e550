//! Position samples
//!
//! A [`PositionSample`] is one timestamped telemetry point. Samples are
//! immutable once recorded; histories only ever append them.

use crate::types::TimestampMatch;
use serde::{Deserialize, Serialize};

/// One timestamped telemetry sample
///
/// The timestamp is an opaque string supplied by the producer. It is never
/// parsed for ordering; histories keep arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in feet
    pub altitude: f64,
    /// Ground speed in knots
    pub speed: f64,
    /// Heading in degrees, 0 when the producer omits it
    #[serde(default)]
    pub heading: f64,
    /// Producer timestamp, compared as a string
    pub timestamp: String,
}

impl PositionSample {
    /// Create a sample with heading 0
    pub fn new(
        latitude: f64,
        longitude: f64,
        altitude: f64,
        speed: f64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            speed,
            heading: 0.0,
            timestamp: timestamp.into(),
        }
    }

    /// Set the heading
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }
}

/// First sample in `history` whose timestamp matches `requested`
pub(crate) fn first_at<'a>(
    history: &'a [PositionSample],
    requested: &str,
    mode: TimestampMatch,
) -> Option<&'a PositionSample> {
    history
        .iter()
        .find(|sample| mode.matches(&sample.timestamp, requested))
}
