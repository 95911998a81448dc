use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use super::ForecastFeed;

/// Reads a previously saved forecast document. The city argument is ignored.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ForecastFeed for FileFeed {
    async fn fetch(&self, _city: &str) -> Result<Vec<u8>> {
        tracing::info!(path = %self.path.display(), "reading forecast from file");

        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read forecast file: {}", self.path.display()))
    }
}
