//! Conduit - Destinations
//!
//! Per-vendor configurers that wire a destination into a collector document.
//!
//! # Overview
//!
//! Each destination type (Jaeger, Honeycomb, Loki, ...) has one
//! [`Configurer`]. Given a [`Destination`] descriptor and the document being
//! composed, a configurer adds:
//!
//! - one exporter named `<exporterKind>/<destinationType>`, when at least one
//!   of its signals is enabled
//! - one pipeline named `<signal>/<destinationType>` per enabled signal,
//!   reading from the shared `otlp` receiver through the shared `batch`
//!   processor into that exporter
//!
//! Nothing is added for signals that are off. Secrets never enter the
//! document: exporters reference them through `${env:KEY}` placeholders the
//! collector expands at startup.
//!
//! # Adding a New Destination
//!
//! 1. **Implement `Configurer`** on a unit struct:
//!
//! ```ignore
//! pub struct MyDestConfigurer;
//!
//! impl Configurer for MyDestConfigurer {
//!     fn destination_type(&self) -> DestinationType {
//!         DestinationType::from_static("mydest")
//!     }
//!
//!     fn display_name(&self) -> &'static str {
//!         "My Destination"
//!     }
//!
//!     fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
//!         if !tracing_enabled(dest) {
//!             return Ok(());
//!         }
//!         let endpoint = required_data(dest, "MYDEST_URL")?;
//!         let exporter = exporter_name("otlp", &dest.dest_type);
//!         doc.add_exporter(&exporter, ExporterSettings::with_endpoint(endpoint))?;
//!         add_signal_pipelines(doc, dest, SignalSet::only(Signal::Traces), &exporter)
//!     }
//! }
//! ```
//!
//! 2. **Register it** in `ConfigurerRegistry::builtin()`, or on a registry
//!    the embedding application builds itself.
//!
//! # Modules
//!
//! - `gate` - Signal predicates
//! - `registry` - Type → configurer lookup
//! - `vendors` - Built-in configurers

mod error;
pub mod gate;
pub mod registry;
pub mod vendors;

pub use error::{DestinationError, Result};
pub use gate::{logging_enabled, metrics_enabled, tracing_enabled};
pub use registry::ConfigurerRegistry;
pub use vendors::{
    DatadogConfigurer, HoneycombConfigurer, JaegerConfigurer, LokiConfigurer, OtlpConfigurer,
    PrometheusConfigurer,
};

pub use conduit_config::{
    ConfigDocument, Destination, DestinationType, ExporterSettings, Pipeline, Signal, SignalSet,
    TlsSettings, exporter_name, pipeline_name,
};

use tracing::debug;

/// Wires one destination type into a collector document
///
/// Implementors must be `Send + Sync`: a registry is built once and shared
/// across concurrent composition runs.
///
/// `modify_config` must only add entries. It must not remove or edit
/// anything already in the document, and it may assume nothing about the
/// document beyond the shared base receivers and processors.
pub trait Configurer: Send + Sync {
    /// The destination type this configurer handles
    fn destination_type(&self) -> DestinationType;

    /// Human-readable vendor name
    fn display_name(&self) -> &'static str;

    /// Signals this vendor can receive
    ///
    /// Signals outside this set are dropped before `modify_config` runs.
    fn supported_signals(&self) -> SignalSet {
        SignalSet::ALL
    }

    /// Add this destination's exporters and pipelines to `doc`
    ///
    /// # Errors
    ///
    /// - `DestinationError::MissingRequiredField` if the descriptor lacks a
    ///   key the vendor needs
    /// - `DestinationError::InvalidValue` if a value can't be used
    /// - `DestinationError::Document` if a name is already taken
    fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()>;
}

/// Get a required non-secret setting
///
/// # Errors
///
/// Returns `DestinationError::MissingRequiredField` if the key is absent or blank.
pub fn required_data<'a>(dest: &'a Destination, key: &str) -> Result<&'a str> {
    dest.data(key)
        .ok_or_else(|| DestinationError::missing_field(&dest.dest_type, key))
}

/// Reference a secret by environment placeholder
///
/// Returns `${env:KEY}`. The secret value itself is never read here; the
/// deployment layer exports it into the collector's environment under the
/// same name.
///
/// # Errors
///
/// - `DestinationError::MissingRequiredField` if no non-blank secret is stored under `key`
/// - `DestinationError::InvalidValue` if `key` is not a valid environment variable name
pub fn secret_ref(dest: &Destination, key: &str) -> Result<String> {
    if !is_env_name(key) {
        return Err(DestinationError::invalid_value(
            &dest.dest_type,
            key,
            "secret keys must be environment variable names ([A-Za-z_][A-Za-z0-9_]*)",
        ));
    }
    if !dest.has_secret(key) {
        return Err(DestinationError::missing_field(&dest.dest_type, key));
    }
    Ok(format!("${{env:{}}}", key))
}

fn is_env_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Add one base pipeline per signal in `signals`, each exporting to `exporter`
///
/// Pipelines are added in traces, metrics, logs order.
pub fn add_signal_pipelines(
    doc: &mut ConfigDocument,
    dest: &Destination,
    signals: SignalSet,
    exporter: &str,
) -> Result<()> {
    for signal in signals.iter() {
        let name = pipeline_name(signal, &dest.dest_type);
        debug!(destination = %dest.id, pipeline = %name, exporter, "adding pipeline");
        doc.add_pipeline(name, Pipeline::from_base(exporter))?;
    }
    Ok(())
}

/// Add `settings` as the destination's `<kind>/<type>` exporter, then one
/// pipeline per signal in `signals`
///
/// Adds nothing when `signals` is empty. This is the whole of
/// `modify_config` for vendors that use one exporter for every signal.
pub fn add_exporter_with_pipelines(
    doc: &mut ConfigDocument,
    dest: &Destination,
    signals: SignalSet,
    kind: &str,
    settings: ExporterSettings,
) -> Result<()> {
    if signals.is_empty() {
        return Ok(());
    }

    let exporter = exporter_name(kind, &dest.dest_type);
    debug!(destination = %dest.id, exporter = %exporter, "adding exporter");
    doc.add_exporter(&exporter, settings)?;
    add_signal_pipelines(doc, dest, signals, &exporter)
}
