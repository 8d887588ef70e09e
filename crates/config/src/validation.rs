//! Configuration validation
//!
//! Validates config consistency:
//! - Destination ids are present and unique
//! - Destination types are present
//!
//! Whether a destination's type is actually registered, and whether its
//! data carries the keys its vendor needs, is checked at composition time
//! by the configurer registry.

use crate::AppConfig;
use crate::error::{ConfigError, Result};
use std::collections::HashSet;

/// Validate the entire configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    validate_destinations(config)?;
    Ok(())
}

/// Validate destination descriptors
fn validate_destinations(config: &AppConfig) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (i, dest) in config.destinations.iter().enumerate() {
        let id = dest.id.trim();
        if id.is_empty() {
            return Err(ConfigError::invalid_value(
                "destination",
                format!("destinations[{}]", i),
                "id",
                "must not be empty",
            ));
        }

        if dest.dest_type.as_str().trim().is_empty() {
            return Err(ConfigError::missing_field("destination", id, "type"));
        }

        if !seen.insert(id) {
            return Err(ConfigError::duplicate_destination(id));
        }
    }

    Ok(())
}
