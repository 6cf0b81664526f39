//! Configuration file and environment overrides.
//!
//! The config is a JSON object with SCREAMING_SNAKE_CASE keys. A missing
//! file means defaults. Any key can be overridden with a `FREESLOT_<KEY>`
//! environment variable; list values are comma-separated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::daterange::parse_time_of_day;

const ENV_PREFIX: &str = "FREESLOT_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Config {
    pub time_zone: String,
    pub availability_start: String,
    pub availability_end: String,
    pub calendar_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: "America/Los_Angeles".to_string(),
            availability_start: "08:00".to_string(),
            availability_end: "18:00".to_string(),
            calendar_ids: vec!["primary".to_string()],
            busy_file: None,
        }
    }
}

/// `<user config dir>/freeslot/config.json`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("freeslot").join("config.json"))
}

impl Config {
    /// Load the config at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    /// Apply `FREESLOT_<KEY>` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

        if let Some(v) = var("TIME_ZONE") {
            self.time_zone = v;
        }
        if let Some(v) = var("AVAILABILITY_START") {
            self.availability_start = v;
        }
        if let Some(v) = var("AVAILABILITY_END") {
            self.availability_end = v;
        }
        if let Some(v) = var("CALENDAR_IDS") {
            self.calendar_ids = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = var("BUSY_FILE") {
            self.busy_file = Some(PathBuf::from(v));
        }
    }

    /// Load from `path` and apply overrides from the process environment.
    pub fn from_file_and_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.time_zone.trim().is_empty() {
            missing.push("TIME_ZONE");
        }
        if self.availability_start.trim().is_empty() {
            missing.push("AVAILABILITY_START");
        }
        if self.availability_end.trim().is_empty() {
            missing.push("AVAILABILITY_END");
        }
        if self.calendar_ids.is_empty() {
            missing.push("CALENDAR_IDS");
        }
        if !missing.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "missing required keys: {}",
                missing.join(", ")
            )));
        }

        if self.calendar_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "CALENDAR_IDS must not contain empty entries".to_string(),
            ));
        }
        freeslot_engine::params::parse_timezone(&self.time_zone)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.availability_window()?;
        Ok(())
    }

    /// The configured availability window as times of day.
    pub fn availability_window(&self) -> Result<(NaiveTime, NaiveTime), ConfigError> {
        let start = parse_time_of_day(&self.availability_start)
            .map_err(|e| ConfigError::Invalid(format!("AVAILABILITY_START: {e}")))?;
        let end = parse_time_of_day(&self.availability_end)
            .map_err(|e| ConfigError::Invalid(format!("AVAILABILITY_END: {e}")))?;
        Ok((start, end))
    }

    /// Write the config as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json + "\n").map_err(io_err)
    }
}
