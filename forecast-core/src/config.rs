use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::feed::Endpoint;

/// City used when neither the command line nor the config file names one.
pub const FALLBACK_CITY: &str = "Pittsburgh";

/// Per-endpoint overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    /// Replaces the endpoint's built-in server, e.g. for a proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub default_city: Option<String>,

    /// "sample" or "live".
    pub default_endpoint: Option<String>,

    /// Example TOML:
    /// [endpoints.live]
    /// app_id = "..."
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointConfig>,
}

impl Config {
    /// Return the default endpoint, falling back to the sample server.
    pub fn default_endpoint(&self) -> Result<Endpoint> {
        match self.default_endpoint.as_deref() {
            Some(s) => Endpoint::try_from(s),
            None => Ok(Endpoint::Sample),
        }
    }

    pub fn set_default_endpoint(&mut self, endpoint: Endpoint) {
        self.default_endpoint = Some(endpoint.as_str().to_string());
    }

    pub fn endpoint_config(&self, endpoint: Endpoint) -> Option<&EndpointConfig> {
        self.endpoints.get(endpoint.as_str())
    }

    /// Set/replace the app id for an endpoint, keeping any other overrides.
    pub fn upsert_app_id(&mut self, endpoint: Endpoint, app_id: String) {
        self.endpoints.entry(endpoint.as_str().to_string()).or_default().app_id = Some(app_id);
    }

    /// Configured app id, or the endpoint's built-in one.
    pub fn app_id(&self, endpoint: Endpoint) -> Option<&str> {
        self.endpoint_config(endpoint)
            .and_then(|cfg| cfg.app_id.as_deref())
            .or_else(|| endpoint.builtin_app_id())
    }

    pub fn base_url(&self, endpoint: Endpoint) -> &str {
        self.endpoint_config(endpoint)
            .and_then(|cfg| cfg.base_url.as_deref())
            .unwrap_or_else(|| endpoint.default_base_url())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Everything a single run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub city: String,
    pub endpoint: Endpoint,
    pub verbose_output: bool,
    pub raw_output: bool,
}

/// Values given on the command line; `None`/`false` defer to the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub city: Option<String>,
    pub live: bool,
    pub verbose_output: bool,
    pub raw_output: bool,
}

impl RunConfig {
    pub fn resolve(config: &Config, overrides: RunOverrides) -> Result<Self> {
        let city = overrides
            .city
            .or_else(|| config.default_city.clone())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK_CITY.to_string());

        let endpoint = if overrides.live { Endpoint::Live } else { config.default_endpoint()? };

        Ok(Self {
            city,
            endpoint,
            verbose_output: overrides.verbose_output,
            raw_output: overrides.raw_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_sample() {
        let cfg = Config::default();
        assert_eq!(cfg.default_endpoint().expect("default"), Endpoint::Sample);
    }

    #[test]
    fn unknown_default_endpoint_errors() {
        let cfg = Config { default_endpoint: Some("staging".into()), ..Config::default() };
        let err = cfg.default_endpoint().unwrap_err();
        assert!(err.to_string().contains("Unknown endpoint"));
    }

    #[test]
    fn sample_has_builtin_app_id_and_live_does_not() {
        let cfg = Config::default();
        assert!(cfg.app_id(Endpoint::Sample).is_some());
        assert_eq!(cfg.app_id(Endpoint::Live), None);
    }

    #[test]
    fn upsert_app_id_keeps_base_url_override() {
        let mut cfg = Config::default();
        cfg.endpoints.insert(
            "live".into(),
            EndpointConfig { app_id: None, base_url: Some("http://proxy.local".into()) },
        );

        cfg.upsert_app_id(Endpoint::Live, "LIVE_KEY".into());

        assert_eq!(cfg.app_id(Endpoint::Live), Some("LIVE_KEY"));
        assert_eq!(cfg.base_url(Endpoint::Live), "http://proxy.local");
        assert_eq!(cfg.base_url(Endpoint::Sample), Endpoint::Sample.default_base_url());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config { default_city: Some("Reykjavik".into()), ..Config::default() };
        cfg.set_default_endpoint(Endpoint::Live);
        cfg.upsert_app_id(Endpoint::Live, "LIVE_KEY".into());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.default_city.as_deref(), Some("Reykjavik"));
        assert_eq!(loaded.default_endpoint().expect("endpoint"), Endpoint::Live);
        assert_eq!(loaded.app_id(Endpoint::Live), Some("LIVE_KEY"));
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");
        assert!(cfg.default_city.is_none());
        assert!(cfg.endpoints.is_empty());
    }

    #[test]
    fn resolve_prefers_cli_then_config_then_fallback() {
        let cfg = Config { default_city: Some("Oslo".into()), ..Config::default() };

        let run = RunConfig::resolve(&cfg, RunOverrides::default()).expect("resolve");
        assert_eq!(run.city, "Oslo");
        assert_eq!(run.endpoint, Endpoint::Sample);

        let overrides = RunOverrides {
            city: Some("Bergen".into()),
            live: true,
            verbose_output: true,
            ..RunOverrides::default()
        };
        let run = RunConfig::resolve(&cfg, overrides).expect("resolve");
        assert_eq!(run.city, "Bergen");
        assert_eq!(run.endpoint, Endpoint::Live);
        assert!(run.verbose_output);
        assert!(!run.raw_output);

        let run = RunConfig::resolve(&Config::default(), RunOverrides::default()).expect("resolve");
        assert_eq!(run.city, FALLBACK_CITY);
    }
}
