//! Configurer Registry - destination type → configurer lookup
//!
//! The registry maps destination type tags to their configurers, enabling
//! descriptor-driven composition.
//!
//! # Design
//!
//! - **Compile-time extensibility**: vendors implement the `Configurer` trait
//! - **One binding per type**: a second registration for a type is an error
//! - **Read-only after startup**: build once, then share behind `Arc`
//!
//! # Example
//!
//! ```
//! use conduit_destinations::{ConfigurerRegistry, DestinationType, JaegerConfigurer};
//!
//! let mut registry = ConfigurerRegistry::new();
//! registry.register(JaegerConfigurer).unwrap();
//!
//! let jaeger = registry.resolve(&DestinationType::from_static("jaeger")).unwrap();
//! assert_eq!(jaeger.display_name(), "Jaeger");
//! ```

use crate::vendors::{
    DatadogConfigurer, HoneycombConfigurer, JaegerConfigurer, LokiConfigurer, OtlpConfigurer,
    PrometheusConfigurer,
};
use crate::{Configurer, DestinationError, Result};
use conduit_config::DestinationType;
use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

/// Registry of destination configurers
///
/// Maps destination types (e.g. "jaeger", "honeycomb") to their
/// configurer implementations.
pub struct ConfigurerRegistry {
    configurers: HashMap<DestinationType, Box<dyn Configurer>>,
}

impl ConfigurerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            configurers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in vendor registered
    ///
    /// Includes:
    /// - `otlp` - Generic OTLP/gRPC endpoint
    /// - `jaeger` - Jaeger (traces)
    /// - `honeycomb` - Honeycomb
    /// - `datadog` - Datadog
    /// - `loki` - Grafana Loki (logs)
    /// - `prometheus` - Prometheus remote write (metrics)
    ///
    /// # Errors
    ///
    /// Returns `DestinationError::RegistrationConflict` if two built-ins
    /// claim the same type.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(OtlpConfigurer)?;
        registry.register(JaegerConfigurer)?;
        registry.register(HoneycombConfigurer)?;
        registry.register(DatadogConfigurer)?;
        registry.register(LokiConfigurer)?;
        registry.register(PrometheusConfigurer)?;
        Ok(registry)
    }

    /// Register a configurer under its own destination type
    ///
    /// # Errors
    ///
    /// Returns `DestinationError::RegistrationConflict` if the type is
    /// already bound. The existing binding is kept.
    pub fn register<C: Configurer + 'static>(&mut self, configurer: C) -> Result<()> {
        self.register_boxed(Box::new(configurer))
    }

    /// Register an already boxed configurer
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_boxed(&mut self, configurer: Box<dyn Configurer>) -> Result<()> {
        let dest_type = configurer.destination_type();
        if self.configurers.contains_key(&dest_type) {
            return Err(DestinationError::registration_conflict(dest_type));
        }
        self.configurers.insert(dest_type, configurer);
        Ok(())
    }

    /// Look up the configurer for a destination type
    ///
    /// # Errors
    ///
    /// Returns `DestinationError::UnknownDestinationType` if nothing is
    /// registered for the type. The message lists the registered types.
    pub fn resolve(&self, dest_type: &DestinationType) -> Result<&dyn Configurer> {
        self.configurers
            .get(dest_type)
            .map(|c| &**c)
            .ok_or_else(|| {
                DestinationError::unknown_type(dest_type.clone(), &self.destination_types())
            })
    }

    /// Check if a destination type is registered
    pub fn contains(&self, dest_type: &DestinationType) -> bool {
        self.configurers.contains_key(dest_type)
    }

    /// Registered destination types, sorted
    pub fn destination_types(&self) -> Vec<&DestinationType> {
        let mut types: Vec<&DestinationType> = self.configurers.keys().collect();
        types.sort();
        types
    }

    /// Iterate over configurers, sorted by destination type
    pub fn iter(&self) -> impl Iterator<Item = &dyn Configurer> {
        let mut entries: Vec<_> = self.configurers.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, c)| &**c)
    }

    /// Get the number of registered configurers
    pub fn len(&self) -> usize {
        self.configurers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.configurers.is_empty()
    }
}

impl Default for ConfigurerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigurerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurerRegistry")
            .field("types", &self.destination_types())
            .finish()
    }
}
