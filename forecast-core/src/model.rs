use serde::Serialize;
use std::str::FromStr;

use crate::error::FieldParseError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub country: String,
}

/// Absolute temperature as reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Kelvin(pub f64);

impl Kelvin {
    pub fn to_fahrenheit(self) -> f64 {
        (self.0 - 273.15) * 9.0 / 5.0 + 32.0
    }
}

impl FromStr for Kelvin {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FieldParseError::MissingTemperature);
        }

        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Kelvin(v)),
            _ => Err(FieldParseError::InvalidTemperature(s.to_string())),
        }
    }
}

/// One forecast window.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeslot {
    /// Opaque start label, e.g. "2017-03-03T06:00:00".
    pub from: String,
    pub to: String,
    /// Precipitation type, empty when there is none.
    pub precipitation: String,
    pub temperature: Result<Kelvin, FieldParseError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub location: Location,
    /// Chronological, earliest first, exactly as received.
    pub timeslots: Vec<Timeslot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Snow,
    Ice,
    Freezing,
    Cold,
    Warm,
    Hot,
}

impl AdvisoryKind {
    /// Temperature bucket for a Fahrenheit reading. Buckets are closed on their upper bound.
    pub fn for_fahrenheit(f: f64) -> Self {
        if f <= 32.0 {
            AdvisoryKind::Freezing
        } else if f <= 40.0 {
            AdvisoryKind::Cold
        } else if f <= 70.0 {
            AdvisoryKind::Warm
        } else {
            AdvisoryKind::Hot
        }
    }

    pub fn is_temperature(&self) -> bool {
        matches!(
            self,
            AdvisoryKind::Freezing | AdvisoryKind::Cold | AdvisoryKind::Warm | AdvisoryKind::Hot
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub from: String,
    pub to: String,
    pub kind: AdvisoryKind,
}

/// Classification result for a single timeslot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotReport<'a> {
    pub timeslot: &'a Timeslot,
    /// `None` when the slot had no usable temperature reading.
    pub fahrenheit: Option<f64>,
    pub advisories: Vec<Advisory>,
}
