//! Ingestion requests
//!
//! Telemetry producers send loosely typed bodies: numbers may arrive as JSON
//! numbers or as numeric strings, heading and status are optional. An
//! [`IngestRequest`] captures that shape with explicit optional fields and is
//! validated exactly once into a [`ValidatedIngest`] before anything touches
//! the stores.
//!
//! ## Required fields
//!
//! `id` (alias `flight_number`), `latitude`, `longitude`, `altitude`, `speed`,
//! `timestamp`. Presence is checked in that order, then numeric parsing, so
//! the first missing field is the one reported.

use crate::error::{Error, Result};
use crate::primitives::PositionSample;
use crate::types::{FlightId, FlightStatus};
use serde::{Deserialize, Serialize};

/// A numeric field as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    /// JSON number
    Number(f64),
    /// Numeric string, e.g. `"35000"`
    Text(String),
    /// Any other JSON value; rejected by [`NumericField::to_f64`]
    Other(serde_json::Value),
}

impl NumericField {
    /// Coerce to a finite `f64`
    pub fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            NumericField::Number(n) => *n,
            NumericField::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::invalid(field, format!("'{}' is not a number", s)))?,
            NumericField::Other(v) => {
                return Err(Error::invalid(field, format!("{} is not a number", v)))
            }
        };
        if !value.is_finite() {
            return Err(Error::invalid(field, "must be a finite number"));
        }
        Ok(value)
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        NumericField::Number(value)
    }
}

/// A telemetry push before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Flight id
    #[serde(alias = "flight_number", default)]
    pub id: Option<String>,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<NumericField>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<NumericField>,
    /// Altitude in feet
    #[serde(default)]
    pub altitude: Option<NumericField>,
    /// Ground speed in knots
    #[serde(default)]
    pub speed: Option<NumericField>,
    /// Heading in degrees, defaults to 0
    #[serde(default)]
    pub heading: Option<NumericField>,
    /// Producer timestamp
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Status, defaults to the engine's default status
    #[serde(default)]
    pub status: Option<String>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedIngest {
    /// Flight id
    pub id: FlightId,
    /// The sample to record
    pub sample: PositionSample,
    /// Explicit status, `None` when the producer sent none
    pub status: Option<FlightStatus>,
}

impl IngestRequest {
    /// Start a request for a flight
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Set latitude, longitude, altitude and speed
    pub fn position(mut self, latitude: f64, longitude: f64, altitude: f64, speed: f64) -> Self {
        self.latitude = Some(latitude.into());
        self.longitude = Some(longitude.into());
        self.altitude = Some(altitude.into());
        self.speed = Some(speed.into());
        self
    }

    /// Set the heading
    pub fn heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Set the producer timestamp
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set the status
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Parse a JSON body
    ///
    /// A text field holding a non-string value is reported under its own
    /// name; numeric fields of the wrong type fail later, in `validate`.
    pub fn from_json(body: &serde_json::Value) -> Result<Self> {
        if let Some(object) = body.as_object() {
            for field in TEXT_FIELDS {
                match object.get(*field) {
                    None | Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) => {}
                    Some(other) => {
                        return Err(Error::invalid(
                            *field,
                            format!("expected a string, got {}", other),
                        ))
                    }
                }
            }
        }
        serde_json::from_value(body.clone()).map_err(|e| Error::invalid("body", e.to_string()))
    }

    /// Check presence and shape of every field
    ///
    /// Fails on the first problem; never partially applies anything.
    pub fn validate(&self) -> Result<ValidatedIngest> {
        let id = self.id.as_deref().ok_or_else(|| Error::missing("id"))?;
        let latitude = require(&self.latitude, "latitude")?;
        let longitude = require(&self.longitude, "longitude")?;
        let altitude = require(&self.altitude, "altitude")?;
        let speed = require(&self.speed, "speed")?;
        let timestamp = match self.timestamp.as_deref() {
            Some(ts) if !ts.is_empty() => ts,
            _ => return Err(Error::missing("timestamp")),
        };

        let id = FlightId::new(id)?;
        let heading = match &self.heading {
            Some(h) => h.to_f64("heading")?,
            None => 0.0,
        };

        let sample = PositionSample {
            latitude: latitude.to_f64("latitude")?,
            longitude: longitude.to_f64("longitude")?,
            altitude: altitude.to_f64("altitude")?,
            speed: speed.to_f64("speed")?,
            heading,
            timestamp: timestamp.to_string(),
        };

        let status = self
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(FlightStatus::parse);

        Ok(ValidatedIngest { id, sample, status })
    }
}

const TEXT_FIELDS: &[&str] = &["id", "flight_number", "timestamp", "status"];

fn require<'a>(field: &'a Option<NumericField>, name: &str) -> Result<&'a NumericField> {
    field.as_ref().ok_or_else(|| Error::missing(name))
}
