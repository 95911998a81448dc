//! Decoding of the OpenWeatherMap XML forecast document.
//!
//! The wire structs below mirror only the parts of `weatherdata` we care about;
//! every other element and attribute is ignored so the feed can grow freely.

use serde::{
    Deserialize, Deserializer,
    de::{IgnoredAny, MapAccess, Visitor},
};
use std::fmt;
use xml::reader::{EventReader, XmlEvent};

use crate::{
    error::{DecodeError, FieldParseError},
    model::{Forecast, Kelvin, Location, Timeslot},
};

#[derive(Debug, Deserialize)]
struct XmlWeatherData {
    location: XmlLocation,
    forecast: XmlForecast,
}

#[derive(Debug, Deserialize)]
struct XmlLocation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
}

const ROOT_ELEMENT: &str = "weatherdata";

#[derive(Debug)]
struct XmlForecast {
    timeslots: Vec<XmlTimeslot>,
}

// serde-xml-rs only collects a `Vec` field from adjacent elements, so `time` windows
// separated by any other element are gathered one at a time here.
impl<'de> Deserialize<'de> for XmlForecast {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ForecastVisitor;

        impl<'de> Visitor<'de> for ForecastVisitor {
            type Value = XmlForecast;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a forecast element")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<XmlForecast, A::Error> {
                let mut timeslots = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "time" {
                        timeslots.push(map.next_value::<XmlTimeslot>()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(XmlForecast { timeslots })
            }
        }

        deserializer.deserialize_struct("forecast", &["time"], ForecastVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct XmlTimeslot {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    precipitation: Option<XmlPrecipitation>,
    #[serde(default)]
    temperature: Option<XmlTemperature>,
}

#[derive(Debug, Deserialize)]
struct XmlPrecipitation {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlTemperature {
    #[serde(default)]
    value: Option<String>,
}

/// Decode a complete forecast document.
///
/// Fails only when the document is not well-formed, has a root other than `weatherdata`,
/// or lacks the `location` / `forecast` sections. Per-slot problems are kept on the slot.
pub fn decode(raw: &[u8]) -> Result<Forecast, DecodeError> {
    check_root(raw)?;

    let doc: XmlWeatherData =
        serde_xml_rs::from_reader(raw).map_err(|err| DecodeError::Malformed(err.to_string()))?;

    let forecast = doc.into_forecast();

    tracing::debug!(
        city = %forecast.location.name,
        country = %forecast.location.country,
        timeslots = forecast.timeslots.len(),
        "decoded forecast document"
    );

    Ok(forecast)
}

/// serde-xml-rs does not look at the root element's name, so check it up front.
fn check_root(raw: &[u8]) -> Result<(), DecodeError> {
    for event in EventReader::new(raw) {
        match event {
            Ok(XmlEvent::StartElement { name, .. }) if name.local_name == ROOT_ELEMENT => {
                return Ok(());
            }
            Ok(XmlEvent::StartElement { name, .. }) => {
                return Err(DecodeError::Malformed(format!(
                    "expected root element <{ROOT_ELEMENT}>, found <{}>",
                    name.local_name
                )));
            }
            Ok(_) => {}
            Err(err) => return Err(DecodeError::Malformed(err.to_string())),
        }
    }

    Err(DecodeError::Malformed(format!("missing root element <{ROOT_ELEMENT}>")))
}

impl XmlWeatherData {
    fn into_forecast(self) -> Forecast {
        let location = Location {
            name: self.location.name.trim().to_string(),
            country: self.location.country.trim().to_string(),
        };

        let timeslots = self
            .forecast
            .timeslots
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.into_timeslot(index))
            .collect();

        Forecast { location, timeslots }
    }
}

impl XmlTimeslot {
    fn into_timeslot(self, index: usize) -> Option<Timeslot> {
        let from = non_empty(self.from);
        let to = non_empty(self.to);

        let (Some(from), Some(to)) = (from, to) else {
            tracing::warn!(index, "dropping forecast window without from/to labels");
            return None;
        };

        let precipitation = self
            .precipitation
            .and_then(|p| p.kind)
            .map(|kind| kind.trim().to_string())
            .unwrap_or_default();

        let temperature = match self.temperature.and_then(|t| t.value) {
            Some(value) => value.parse::<Kelvin>(),
            None => Err(FieldParseError::MissingTemperature),
        };

        Some(Timeslot { from, to, precipitation, temperature })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
