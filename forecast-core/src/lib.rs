//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Decoding of the OpenWeatherMap XML forecast into a typed model
//! - Classification of each forecast window into advisories
//! - Feeds that produce the raw document (HTTP, file)
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but the decode/classify pipeline has no I/O and can be
//! reused anywhere a forecast document is available as bytes.

pub mod classify;
pub mod config;
pub mod decode;
pub mod error;
pub mod feed;
pub mod model;

pub use classify::{advisories, classify, classify_slot};
pub use config::{Config, EndpointConfig, RunConfig, RunOverrides};
pub use decode::decode;
pub use error::{DecodeError, FieldParseError};
pub use feed::{Endpoint, ForecastFeed};
pub use model::{Advisory, AdvisoryKind, Forecast, Kelvin, Location, SlotReport, Timeslot};
