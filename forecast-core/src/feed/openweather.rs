use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;

use super::ForecastFeed;

/// OpenWeatherMap 5 day / 3 hour forecast in XML mode.
#[derive(Debug, Clone)]
pub struct OpenWeatherFeed {
    base_url: String,
    app_id: String,
    http: Client,
}

impl OpenWeatherFeed {
    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_id: app_id.into(),
            http: Client::new(),
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/data/2.5/forecast", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ForecastFeed for OpenWeatherFeed {
    async fn fetch(&self, city: &str) -> Result<Vec<u8>> {
        let url = self.forecast_url();
        tracing::info!(%url, city, "fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("mode", "xml"), ("appid", self.app_id.as_str())])
            .send()
            .await
            .context("Failed to send request to OpenWeather (forecast)")?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .context("Failed to read OpenWeather forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&String::from_utf8_lossy(&body)),
            ));
        }

        tracing::debug!(bytes = body.len(), "received forecast document");
        Ok(body.to_vec())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
