//! Sources of raw forecast documents.
//!
//! A feed only produces bytes; transport failures (unreachable server, non-2xx status)
//! are reported here and never reach the decoder.

use crate::{
    Config,
    feed::{file::FileFeed, openweather::OpenWeatherFeed},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, path::PathBuf};

pub mod file;
pub mod openweather;

/// Public demo key accepted by the OpenWeatherMap sample server.
const SAMPLE_APP_ID: &str = "b6907d289e10d714a6e88b30761fae22";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    #[default]
    Sample,
    Live,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Sample => "sample",
            Endpoint::Live => "live",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[Endpoint::Sample, Endpoint::Live]
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Endpoint::Sample => "http://samples.openweathermap.org",
            Endpoint::Live => "https://api.openweathermap.org",
        }
    }

    pub fn builtin_app_id(&self) -> Option<&'static str> {
        match self {
            Endpoint::Sample => Some(SAMPLE_APP_ID),
            Endpoint::Live => None,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Endpoint {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "sample" => Ok(Endpoint::Sample),
            "live" => Ok(Endpoint::Live),
            _ => Err(anyhow::anyhow!("Unknown endpoint '{value}'. Supported endpoints: sample, live.")),
        }
    }
}

#[async_trait]
pub trait ForecastFeed: Send + Sync + Debug {
    /// Fetch the complete forecast document for `city`.
    async fn fetch(&self, city: &str) -> anyhow::Result<Vec<u8>>;
}

/// Construct an HTTP feed for `endpoint` using the app id and server from config.
pub fn feed_from_config(
    endpoint: Endpoint,
    config: &Config,
) -> anyhow::Result<Box<dyn ForecastFeed>> {
    let app_id = config.app_id(endpoint).ok_or_else(|| {
        anyhow::anyhow!(
            "No app id configured for endpoint '{endpoint}'.\n\
                 Hint: run `forecast configure {endpoint}` and enter your OpenWeatherMap app id."
        )
    })?;

    let feed = OpenWeatherFeed::new(config.base_url(endpoint), app_id);
    Ok(Box::new(feed))
}

/// Feed reading a saved document instead of the network.
pub fn feed_from_file(path: impl Into<PathBuf>) -> Box<dyn ForecastFeed> {
    Box::new(FileFeed::new(path))
}
