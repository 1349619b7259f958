//! Console driver configuration.
//!
//! Supports loading from YAML files with environment variable overrides.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use radio_core::{RadioConfig, SimulatedEngineConfig};
use serde::Deserialize;

/// Driver configuration loaded from YAML with environment overrides.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Stream endpoint to play.
    /// Override: `RADIO_STREAM_URL`
    pub stream_url: Option<String>,

    /// Treat pause as stop.
    /// Override: `RADIO_PAUSE_STOPS_PLAYING`
    pub pause_stops_playing: bool,

    /// Metadata parser name (`delimited`, `icy`). Omit to drop metadata.
    /// Override: `RADIO_PARSER`
    pub parser: Option<String>,

    /// Separator for the `delimited` parser.
    pub delimiter: Option<String>,

    /// Field names for the `delimited` parser.
    pub fields: Option<Vec<String>>,

    /// Simulated connection delay in milliseconds.
    pub connect_delay_ms: u64,

    /// Simulated resume delay in milliseconds.
    pub resume_delay_ms: u64,

    /// Seconds between simulated metadata updates.
    pub metadata_interval_secs: u64,

    /// Raw metadata strings the simulated stream cycles through.
    pub titles: Option<Vec<String>>,

    /// Endpoints the simulated engine fails to reach.
    pub unreachable: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            stream_url: None,
            pause_stops_playing: false,
            parser: Some("icy".to_string()),
            delimiter: None,
            fields: None,
            connect_delay_ms: 500,
            resume_delay_ms: 200,
            metadata_interval_secs: 10,
            titles: None,
            unreachable: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies overrides looked up by variable name.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RADIO_STREAM_URL") {
            if !url.trim().is_empty() {
                self.stream_url = Some(url);
            }
        }

        if let Some(val) = lookup("RADIO_PAUSE_STOPS_PLAYING") {
            if let Ok(flag) = val.trim().parse() {
                self.pause_stops_playing = flag;
            }
        }

        if let Some(parser) = lookup("RADIO_PARSER") {
            self.parser = match parser.trim() {
                "" | "none" => None,
                name => Some(name.to_string()),
            };
        }

        // Note: RADIO_LOG_LEVEL is handled by clap via #[arg(env = ...)] in main.rs
    }

    /// Converts to radio-core's manager configuration.
    pub fn to_radio_config(&self) -> RadioConfig {
        let defaults = RadioConfig::default();
        RadioConfig {
            stream_url: self.stream_url.clone(),
            pause_stops_playing: self.pause_stops_playing,
            parser: self.parser.clone(),
            delimiter: self.delimiter.clone().unwrap_or(defaults.delimiter),
            fields: self.fields.clone().unwrap_or(defaults.fields),
        }
    }

    /// Converts to the simulated engine's configuration.
    pub fn to_engine_config(&self) -> SimulatedEngineConfig {
        let defaults = SimulatedEngineConfig::default();
        SimulatedEngineConfig {
            connect_delay: Duration::from_millis(self.connect_delay_ms),
            resume_delay: Duration::from_millis(self.resume_delay_ms),
            metadata_interval: Duration::from_secs(self.metadata_interval_secs.max(1)),
            titles: self.titles.clone().unwrap_or(defaults.titles),
            unreachable: self.unreachable.clone(),
        }
    }
}
