//! Collector configuration document
//!
//! Strongly typed model of the collector's native configuration: receivers,
//! processors, exporters, extensions, and the `service.pipelines` section.
//!
//! All maps are ordered by name so that serialized output is deterministic.
//! Exporters and pipelines can only be added, never replaced: inserting a
//! name that already exists fails instead of overwriting the earlier entry.
//!
//! # Example
//!
//! ```yaml
//! receivers:
//!   otlp:
//!     protocols:
//!       grpc:
//!         endpoint: 0.0.0.0:4317
//! processors:
//!   batch: {}
//! exporters:
//!   otlp/jaeger:
//!     endpoint: jaeger:4317
//!     tls:
//!       insecure: true
//! service:
//!   pipelines:
//!     traces/jaeger:
//!       receivers: [otlp]
//!       processors: [batch]
//!       exporters: [otlp/jaeger]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::destination::{DestinationType, Signal};
use crate::error::{ConfigError, Result};

/// Shared receiver every destination pipeline reads from
pub const OTLP_RECEIVER: &str = "otlp";

/// Shared processor every destination pipeline runs through
pub const BATCH_PROCESSOR: &str = "batch";

/// Free-form settings for receivers, processors, and extensions
pub type ComponentSettings = serde_yaml::Value;

/// Build an exporter name: `<exporterKind>/<destinationType>`
pub fn exporter_name(kind: &str, dest_type: &DestinationType) -> String {
    format!("{}/{}", kind, dest_type)
}

/// Build a pipeline name: `<signal>/<destinationType>`
pub fn pipeline_name(signal: Signal, dest_type: &DestinationType) -> String {
    format!("{}/{}", signal, dest_type)
}

/// Kind of a named component in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Entry under `receivers`
    Receiver,
    /// Entry under `processors`
    Processor,
    /// Entry under `exporters`
    Exporter,
    /// Entry under `service.pipelines`
    Pipeline,
}

impl ComponentKind {
    /// Lowercase name for messages
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::Processor => "processor",
            Self::Exporter => "exporter",
            Self::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// TLS client settings for an exporter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    /// Send without TLS
    pub insecure: bool,

    /// Skip server certificate verification
    #[serde(skip_serializing_if = "is_false")]
    pub insecure_skip_verify: bool,

    /// CA bundle used to verify the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
}

impl TlsSettings {
    /// Plaintext connection
    pub fn insecure() -> Self {
        Self {
            insecure: true,
            ..Self::default()
        }
    }
}

/// Settings for one exporter
///
/// The fields shared by most collector exporters are typed; anything
/// vendor-specific goes into `extra`, which is flattened into the same
/// mapping on output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterSettings {
    /// Target endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request headers (values may hold `${env:...}` placeholders)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// TLS client settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsSettings>,

    /// Vendor-specific settings
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ExporterSettings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create settings targeting `endpoint`
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Add a request header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set TLS settings
    #[must_use]
    pub fn tls(mut self, tls: TlsSettings) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Set a vendor-specific value
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A signal pipeline: receivers → processors → exporters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    /// Receiver names, in order
    pub receivers: Vec<String>,

    /// Processor names, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<String>,

    /// Exporter names, in order
    pub exporters: Vec<String>,
}

impl Pipeline {
    /// Pipeline reading from the shared OTLP receiver through the shared
    /// batch processor into a single exporter
    pub fn from_base(exporter: impl Into<String>) -> Self {
        Self {
            receivers: vec![OTLP_RECEIVER.to_string()],
            processors: vec![BATCH_PROCESSOR.to_string()],
            exporters: vec![exporter.into()],
        }
    }

    /// Append a processor after the existing ones
    #[must_use]
    pub fn with_processor(mut self, name: impl Into<String>) -> Self {
        self.processors.push(name.into());
        self
    }

    /// Append an exporter
    #[must_use]
    pub fn with_exporter(mut self, name: impl Into<String>) -> Self {
        self.exporters.push(name.into());
        self
    }
}

/// The `service` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Enabled extensions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    /// Named pipelines
    pub pipelines: BTreeMap<String, Pipeline>,

    /// Other service settings (telemetry, ...), passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A complete collector configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    receivers: BTreeMap<String, ComponentSettings>,
    processors: BTreeMap<String, ComponentSettings>,
    #[serde(deserialize_with = "deserialize_exporters")]
    exporters: BTreeMap<String, ExporterSettings>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extensions: BTreeMap<String, ComponentSettings>,
    service: Service,
}

impl ConfigDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from a YAML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a document from YAML
    ///
    /// An empty input yields an empty document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// Serialize to collector YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Add or replace a receiver (base topology only)
    #[must_use]
    pub fn with_receiver(mut self, name: impl Into<String>, settings: ComponentSettings) -> Self {
        self.receivers.insert(name.into(), settings);
        self
    }

    /// Add or replace a processor (base topology only)
    #[must_use]
    pub fn with_processor(mut self, name: impl Into<String>, settings: ComponentSettings) -> Self {
        self.processors.insert(name.into(), settings);
        self
    }

    /// Add or replace an extension and enable it in the service
    #[must_use]
    pub fn with_extension(mut self, name: impl Into<String>, settings: ComponentSettings) -> Self {
        let name = name.into();
        if !self.service.extensions.contains(&name) {
            self.service.extensions.push(name.clone());
        }
        self.extensions.insert(name, settings);
        self
    }

    /// Add an exporter
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateExporter` if the name is taken. The
    /// existing entry is left untouched.
    pub fn add_exporter(
        &mut self,
        name: impl Into<String>,
        settings: ExporterSettings,
    ) -> Result<()> {
        let name = name.into();
        if self.exporters.contains_key(&name) {
            return Err(ConfigError::duplicate_exporter(name));
        }
        self.exporters.insert(name, settings);
        Ok(())
    }

    /// Add a pipeline
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicatePipeline` if the name is taken. The
    /// existing entry is left untouched.
    pub fn add_pipeline(&mut self, name: impl Into<String>, pipeline: Pipeline) -> Result<()> {
        let name = name.into();
        if self.service.pipelines.contains_key(&name) {
            return Err(ConfigError::duplicate_pipeline(name));
        }
        self.service.pipelines.insert(name, pipeline);
        Ok(())
    }

    /// All receivers
    pub fn receivers(&self) -> &BTreeMap<String, ComponentSettings> {
        &self.receivers
    }

    /// All processors
    pub fn processors(&self) -> &BTreeMap<String, ComponentSettings> {
        &self.processors
    }

    /// All exporters
    pub fn exporters(&self) -> &BTreeMap<String, ExporterSettings> {
        &self.exporters
    }

    /// All extensions
    pub fn extensions(&self) -> &BTreeMap<String, ComponentSettings> {
        &self.extensions
    }

    /// The service section
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// All pipelines
    pub fn pipelines(&self) -> &BTreeMap<String, Pipeline> {
        &self.service.pipelines
    }

    /// Get an exporter by name
    pub fn exporter(&self, name: &str) -> Option<&ExporterSettings> {
        self.exporters.get(name)
    }

    /// Get a pipeline by name
    pub fn pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.service.pipelines.get(name)
    }

    /// Check if a component of the given kind is defined
    pub fn contains(&self, kind: ComponentKind, name: &str) -> bool {
        match kind {
            ComponentKind::Receiver => self.receivers.contains_key(name),
            ComponentKind::Processor => self.processors.contains_key(name),
            ComponentKind::Exporter => self.exporters.contains_key(name),
            ComponentKind::Pipeline => self.service.pipelines.contains_key(name),
        }
    }

    /// First component a pipeline references that the document doesn't define
    ///
    /// Checks receivers, then processors, then exporters, each in list order.
    pub fn first_undefined_reference<'a>(
        &self,
        pipeline: &'a Pipeline,
    ) -> Option<(ComponentKind, &'a str)> {
        let refs = pipeline
            .receivers
            .iter()
            .map(|n| (ComponentKind::Receiver, n))
            .chain(pipeline.processors.iter().map(|n| (ComponentKind::Processor, n)))
            .chain(pipeline.exporters.iter().map(|n| (ComponentKind::Exporter, n)));

        refs.map(|(kind, name)| (kind, name.as_str()))
            .find(|(kind, name)| !self.contains(*kind, name))
    }
}

/// Exporters written as `name:` with no body deserialize to empty settings
fn deserialize_exporters<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, ExporterSettings>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<ExporterSettings>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, settings)| (name, settings.unwrap_or_default()))
        .collect())
}

impl FromStr for ConfigDocument {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_yaml_str(s)
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
