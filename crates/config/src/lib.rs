//! Conduit Configuration
//!
//! Configuration types shared by the composer:
//!
//! - [`ConfigDocument`] - the collector configuration being composed
//! - [`Destination`] - a user-configured telemetry sink
//! - [`AppConfig`] - TOML settings for the `conduit` binary
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse application configuration:
//!
//! ```
//! use conduit_config::AppConfig;
//! use std::str::FromStr;
//!
//! let config = AppConfig::from_str("[log]\nlevel = \"debug\"").unwrap();
//! assert!(config.destinations.is_empty());
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [base]
//! path = "configs/base.yaml"
//!
//! [output]
//! path = "collector.yaml"
//!
//! [[destinations]]
//! id = "jaeger-local"
//! type = "jaeger"
//! signals = ["traces"]
//! data = { JAEGER_URL = "jaeger:4317" }
//! ```

mod destination;
mod document;
mod error;
mod logging;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use destination::{Destination, DestinationType, Signal, SignalSet};
pub use document::{
    BATCH_PROCESSOR, ComponentKind, ComponentSettings, ConfigDocument, ExporterSettings,
    OTLP_RECEIVER, Pipeline, Service, TlsSettings, exporter_name, pipeline_name,
};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};

use serde::Deserialize;

/// Where the base collector document comes from
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Path to a base collector YAML document
    /// Default: none (the binary falls back to its bundled base)
    pub path: Option<PathBuf>,
}

/// Where the composed document goes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to write the composed YAML to
    /// Default: none (stdout)
    pub path: Option<PathBuf>,
}

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub log: LogConfig,

    /// Base collector document
    pub base: BaseConfig,

    /// Composed document output
    pub output: OutputConfig,

    /// Configured destinations, composed in this order
    pub destinations: Vec<Destination>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks for:
    /// - Non-empty destination ids and types
    /// - Unique destination ids
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Destinations with at least one signal enabled
    pub fn active_destinations(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter().filter(|d| !d.signals.is_empty())
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
