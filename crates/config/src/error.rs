//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading, validating, or editing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to parse or emit a collector YAML document
    #[error("invalid collector document: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// An exporter with this name already exists in the document
    #[error("exporter '{name}' already exists")]
    DuplicateExporter {
        /// Name of the exporter
        name: String,
    },

    /// A pipeline with this name already exists in the document
    #[error("pipeline '{name}' already exists")]
    DuplicatePipeline {
        /// Name of the pipeline
        name: String,
    },

    /// Two destinations share the same id
    #[error("destination id '{id}' is used more than once")]
    DuplicateDestination {
        /// The repeated id
        id: String,
    },

    /// Validation error - required field missing
    #[error("{component} '{name}' is missing required field '{field}'")]
    MissingField {
        /// Component type (e.g., "destination", "pipeline")
        component: &'static str,
        /// Name of the component
        name: String,
        /// Missing field name
        field: &'static str,
    },

    /// Validation error - invalid value
    #[error("{component} '{name}' has invalid {field}: {message}")]
    InvalidValue {
        /// Component type
        component: &'static str,
        /// Name of the component
        name: String,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create a DuplicateExporter error
    pub fn duplicate_exporter(name: impl Into<String>) -> Self {
        Self::DuplicateExporter { name: name.into() }
    }

    /// Create a DuplicatePipeline error
    pub fn duplicate_pipeline(name: impl Into<String>) -> Self {
        Self::DuplicatePipeline { name: name.into() }
    }

    /// Create a DuplicateDestination error
    pub fn duplicate_destination(id: impl Into<String>) -> Self {
        Self::DuplicateDestination { id: id.into() }
    }

    /// Create a MissingField error
    pub fn missing_field(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
    ) -> Self {
        Self::MissingField {
            component,
            name: name.into(),
            field,
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            component,
            name: name.into(),
            field,
            message: message.into(),
        }
    }

    /// Name of the component that collided, if this is a duplicate-name error
    pub fn duplicate_name(&self) -> Option<&str> {
        match self {
            Self::DuplicateExporter { name } | Self::DuplicatePipeline { name } => Some(name),
            _ => None,
        }
    }
}
