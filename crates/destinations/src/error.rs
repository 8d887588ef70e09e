//! Destination error types
//!
//! Errors raised while registering configurers or applying them to a
//! collector document.

use conduit_config::{ConfigError, DestinationType};
use thiserror::Error;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Result type for destination operations
pub type Result<T> = std::result::Result<T, DestinationError>;

/// Errors that can occur while resolving or applying a configurer
#[derive(Debug, Error)]
pub enum DestinationError {
    /// No configurer is registered for this type
    #[error("unknown destination type '{dest_type}', available: [{available}]")]
    UnknownDestinationType {
        /// The unresolved type
        dest_type: DestinationType,
        /// Comma-separated registered types
        available: String,
    },

    /// A configurer is already registered for this type
    #[error("a configurer for destination type '{dest_type}' is already registered")]
    RegistrationConflict {
        /// The contested type
        dest_type: DestinationType,
    },

    /// The descriptor lacks a key the vendor needs
    #[error("{dest_type} destination is missing required field '{field}'")]
    MissingRequiredField {
        /// Vendor type
        dest_type: DestinationType,
        /// Missing data or secret key
        field: String,
    },

    /// The descriptor carries a value the vendor can't use
    #[error("{dest_type} destination has invalid {field}: {message}")]
    InvalidValue {
        /// Vendor type
        dest_type: DestinationType,
        /// Offending key
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// The document rejected an edit
    #[error(transparent)]
    Document(#[from] ConfigError),
}

impl DestinationError {
    /// Create an UnknownDestinationType error
    pub fn unknown_type(dest_type: DestinationType, available: &[&DestinationType]) -> Self {
        let available = available
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownDestinationType {
            dest_type,
            available,
        }
    }

    /// Create a RegistrationConflict error
    pub fn registration_conflict(dest_type: DestinationType) -> Self {
        Self::RegistrationConflict { dest_type }
    }

    /// Create a MissingRequiredField error
    pub fn missing_field(dest_type: &DestinationType, field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            dest_type: dest_type.clone(),
            field: field.into(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        dest_type: &DestinationType,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            dest_type: dest_type.clone(),
            field: field.into(),
            message: message.into(),
        }
    }
}
