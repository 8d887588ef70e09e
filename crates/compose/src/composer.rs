//! Composer - all-or-nothing merge of destinations into a base document
//!
//! The composer clones the base document, then hands each destination to
//! its configurer in input order. After every configurer it checks that
//! nothing pre-existing was removed and that every new pipeline only
//! references components the document defines.
//!
//! # Design
//!
//! - **Atomic**: any failure discards the working copy; the caller never
//!   sees a partially composed document and the base is never touched
//! - **Deterministic**: same base and descriptors give the same document
//! - **Shareable**: the composer is immutable, so concurrent runs can share
//!   one `Arc<Composer>`

use crate::{ComposeError, Result};
use conduit_config::{ComponentKind, ConfigDocument, Destination};
use conduit_destinations::{Configurer, ConfigurerRegistry, DestinationError, gate};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;

/// Composes collector documents from destination descriptors
#[derive(Debug)]
pub struct Composer {
    registry: ConfigurerRegistry,
}

impl Composer {
    /// Create a composer over `registry`
    pub fn new(registry: ConfigurerRegistry) -> Self {
        Self { registry }
    }

    /// Create a composer with every built-in vendor registered
    ///
    /// # Errors
    ///
    /// Returns `DestinationError::RegistrationConflict` if two built-ins
    /// claim the same type.
    pub fn builtin() -> std::result::Result<Self, DestinationError> {
        Ok(Self::new(ConfigurerRegistry::builtin()?))
    }

    /// The registry configurers are resolved from
    pub fn registry(&self) -> &ConfigurerRegistry {
        &self.registry
    }

    /// Merge `descriptors` into a copy of `base`
    ///
    /// Descriptors are applied in order. Destinations with no enabled
    /// signals add nothing.
    ///
    /// # Errors
    ///
    /// The first failing destination aborts the run:
    ///
    /// - `ComposeError::UnknownDestinationType` if no configurer handles its type
    /// - `ComposeError::NameConflict` if it adds an exporter or pipeline name
    ///   that is already taken
    /// - `ComposeError::Configurer` if its configurer rejects it
    /// - `ComposeError::RemovedComponent` / `ComposeError::UnknownComponent`
    ///   if its configurer leaves the document inconsistent
    pub fn compose(&self, base: &ConfigDocument, descriptors: &[Destination]) -> Result<ConfigDocument> {
        let mut doc = base.clone();

        for dest in descriptors {
            self.apply(&mut doc, dest)?;
        }

        debug!(
            destinations = descriptors.len(),
            exporters = doc.exporters().len(),
            pipelines = doc.pipelines().len(),
            "composition complete"
        );
        Ok(doc)
    }

    /// Apply one destination to the working document
    fn apply(&self, doc: &mut ConfigDocument, dest: &Destination) -> Result<()> {
        let configurer = self
            .registry
            .resolve(&dest.dest_type)
            .map_err(|e| ComposeError::from_destination(dest, e))?;

        let (kept, dropped) = gate::partition(dest, configurer.supported_signals());
        for signal in dropped.iter() {
            warn!(
                destination = %dest.id,
                destination_type = %dest.dest_type,
                signal = %signal,
                vendor = configurer.display_name(),
                "signal not supported by destination type, skipping"
            );
        }

        if kept.is_empty() {
            debug!(destination = %dest.id, "no signals enabled, skipping");
            return Ok(());
        }

        let before = Snapshot::of(doc);

        if dropped.is_empty() {
            run(configurer, dest, doc)?;
        } else {
            let mut gated = dest.clone();
            gated.signals = kept;
            run(configurer, &gated, doc)?;
        }

        before.verify(doc, dest)?;

        info!(
            destination = %dest.id,
            destination_type = %dest.dest_type,
            signals = %kept,
            exporters = doc.exporters().len() - before.exporters.len(),
            pipelines = doc.pipelines().len() - before.pipelines.len(),
            "composed destination"
        );
        Ok(())
    }
}

fn run(configurer: &dyn Configurer, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
    configurer
        .modify_config(dest, doc)
        .map_err(|e| ComposeError::from_destination(dest, e))
}

/// Exporter and pipeline names present before a configurer ran
struct Snapshot {
    exporters: BTreeSet<String>,
    pipelines: BTreeSet<String>,
}

impl Snapshot {
    fn of(doc: &ConfigDocument) -> Self {
        Self {
            exporters: doc.exporters().keys().cloned().collect(),
            pipelines: doc.pipelines().keys().cloned().collect(),
        }
    }

    fn verify(&self, doc: &ConfigDocument, dest: &Destination) -> Result<()> {
        for (kind, names) in [
            (ComponentKind::Exporter, &self.exporters),
            (ComponentKind::Pipeline, &self.pipelines),
        ] {
            if let Some(name) = names.iter().find(|n| !doc.contains(kind, n)) {
                return Err(ComposeError::removed_component(dest, kind, name.as_str()));
            }
        }

        let added = doc
            .pipelines()
            .iter()
            .filter(|(name, _)| !self.pipelines.contains(*name));
        for (name, pipeline) in added {
            if let Some((kind, missing)) = doc.first_undefined_reference(pipeline) {
                return Err(ComposeError::unknown_component(dest, name.as_str(), kind, missing));
            }
        }

        Ok(())
    }
}
