use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, Endpoint, RunConfig, RunOverrides, classify, decode,
    feed::{feed_from_config, feed_from_file},
};
use inquire::{Select, Text};
use std::{io, path::PathBuf};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather advisories from a city forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default city, endpoint and live app id.
    Configure {
        /// Endpoint to store an app id for: "sample" or "live".
        endpoint: Option<String>,
    },

    /// Show advisories for a city's forecast.
    Show {
        /// City name; defaults to the configured city.
        #[arg(long)]
        city: Option<String>,

        /// Use the live OpenWeatherMap server instead of the sample one.
        #[arg(long)]
        live: bool,

        /// Print the decoded forecast and enable debug logs.
        #[arg(short, long)]
        verbose: bool,

        /// Print the raw document as received.
        #[arg(long)]
        raw: bool,

        /// Read the forecast document from a file instead of the network.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Print advisories as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        matches!(self.command, Command::Show { verbose: true, .. })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { endpoint } => configure(endpoint.as_deref()),
            Command::Show { city, live, verbose, raw, file, json } => {
                let config = Config::load()?;
                let overrides =
                    RunOverrides { city, live, verbose_output: verbose, raw_output: raw };
                let run = RunConfig::resolve(&config, overrides)?;
                show(&config, &run, file, json).await
            }
        }
    }
}

async fn show(
    config: &Config,
    run: &RunConfig,
    file: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let feed = match file {
        Some(path) => feed_from_file(path),
        None => feed_from_config(run.endpoint, config)?,
    };

    let raw = feed.fetch(&run.city).await?;
    if run.raw_output {
        println!("{}", String::from_utf8_lossy(&raw));
    }

    let forecast = decode(&raw)
        .with_context(|| format!("Could not decode the forecast for '{}'", run.city))?;

    let reports = classify(&forecast);

    let mut stdout = io::stdout().lock();
    if json {
        output::write_json(&mut stdout, &forecast, &reports)?;
    } else {
        output::write_text(&mut stdout, &forecast, &reports, run.verbose_output)?;
    }

    Ok(())
}

fn configure(endpoint: Option<&str>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let city = Text::new("Default city:")
        .with_default(config.default_city.as_deref().unwrap_or(forecast_core::config::FALLBACK_CITY))
        .prompt()?;
    config.default_city = Some(city.trim().to_string());

    let endpoint = match endpoint {
        Some(name) => Endpoint::try_from(name)?,
        None => Select::new("Default endpoint:", Endpoint::all().to_vec()).prompt()?,
    };
    config.set_default_endpoint(endpoint);

    if endpoint.builtin_app_id().is_none() {
        let app_id = Text::new(&format!("OpenWeatherMap app id for '{endpoint}':")).prompt()?;
        let app_id = app_id.trim();
        if !app_id.is_empty() {
            config.upsert_app_id(endpoint, app_id.to_string());
        }
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_flags_parse() {
        let cli = Cli::try_parse_from([
            "forecast", "show", "--city", "Oslo", "--live", "-v", "--raw", "--json",
        ])
        .expect("valid args");

        assert!(cli.verbose());
        match cli.command {
            Command::Show { city, live, raw, file, json, .. } => {
                assert_eq!(city.as_deref(), Some("Oslo"));
                assert!(live && raw && json);
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn configure_takes_optional_endpoint() {
        let cli = Cli::try_parse_from(["forecast", "configure"]).expect("valid args");
        assert!(!cli.verbose());
        assert!(matches!(cli.command, Command::Configure { endpoint: None }));
    }
}
