//! Host configuration loaded from TOML.
//!
//! ```toml
//! tick_rate_ms = 16
//!
//! [transition]
//! mount_delay_ms = 50
//! fade_delay_ms = 200
//!
//! [[steps]]
//! title = "Welcome"
//! body = "..."
//! ```
//!
//! Every field is optional; missing ones take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wattstep_core::TransitionTiming;

use crate::steps::{StepContent, default_steps};

/// Default frame interval of the terminal host, in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 16;

/// Errors that can occur while loading host configuration or arguments.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`HostConfig`].
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `steps` was present but empty.
    #[error("Config must define at least one step")]
    NoSteps,

    /// `tick_rate_ms` was zero.
    #[error("tick_rate_ms must be greater than zero")]
    ZeroTickRate,

    /// A timeline entry was not of the form `KEY@DELAY_MS`.
    #[error("Invalid timeline step '{0}': expected KEY@DELAY_MS, e.g. 2@150")]
    InvalidTimelineStep(String),
}

/// Configuration of the onboarding host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Frame interval; due transition timers fire on the next frame.
    pub tick_rate_ms: u64,
    pub transition: TransitionTiming,
    pub steps: Vec<StepContent>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            transition: TransitionTiming::default(),
            steps: default_steps(),
        }
    }
}

impl HostConfig {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        tracing::debug!(
            path = %path.display(),
            steps = config.steps.len(),
            "loaded host config"
        );
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parses and validates TOML; `origin` is only used in error messages.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }
}
