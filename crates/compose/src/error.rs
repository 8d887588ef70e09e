//! Composition error types

use conduit_config::{ComponentKind, ConfigError, Destination, DestinationType};
use conduit_destinations::DestinationError;
use thiserror::Error;

/// Result type for composition
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Errors that abort a composition run
///
/// Every variant names the destination that caused it.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// No configurer is registered for the destination's type
    #[error(
        "destination '{destination}': unknown destination type '{destination_type}', available: [{available}]"
    )]
    UnknownDestinationType {
        /// Destination id
        destination: String,
        /// The unresolved type
        destination_type: DestinationType,
        /// Comma-separated registered types
        available: String,
    },

    /// The destination tried to add a component whose name is already taken
    #[error("destination '{destination}' ({destination_type}): {kind} '{name}' already exists")]
    NameConflict {
        /// Destination id
        destination: String,
        /// Destination type
        destination_type: DestinationType,
        /// Exporter or pipeline
        kind: ComponentKind,
        /// The contested name
        name: String,
    },

    /// The configurer dropped a component that was present before it ran
    #[error("destination '{destination}' ({destination_type}): removed existing {kind} '{name}'")]
    RemovedComponent {
        /// Destination id
        destination: String,
        /// Destination type
        destination_type: DestinationType,
        /// Exporter or pipeline
        kind: ComponentKind,
        /// Name of the removed component
        name: String,
    },

    /// A pipeline added by the configurer references an undefined component
    #[error(
        "destination '{destination}' ({destination_type}): pipeline '{pipeline}' references undefined {kind} '{name}'"
    )]
    UnknownComponent {
        /// Destination id
        destination: String,
        /// Destination type
        destination_type: DestinationType,
        /// The offending pipeline
        pipeline: String,
        /// Receiver, processor, or exporter
        kind: ComponentKind,
        /// The undefined name
        name: String,
    },

    /// The configurer rejected the destination
    #[error("destination '{destination}' ({destination_type}): {source}")]
    Configurer {
        /// Destination id
        destination: String,
        /// Destination type
        destination_type: DestinationType,
        /// What the configurer reported
        #[source]
        source: DestinationError,
    },
}

impl ComposeError {
    /// Create a NameConflict error
    pub fn name_conflict(dest: &Destination, kind: ComponentKind, name: impl Into<String>) -> Self {
        Self::NameConflict {
            destination: dest.id.clone(),
            destination_type: dest.dest_type.clone(),
            kind,
            name: name.into(),
        }
    }

    /// Create a RemovedComponent error
    pub fn removed_component(
        dest: &Destination,
        kind: ComponentKind,
        name: impl Into<String>,
    ) -> Self {
        Self::RemovedComponent {
            destination: dest.id.clone(),
            destination_type: dest.dest_type.clone(),
            kind,
            name: name.into(),
        }
    }

    /// Create an UnknownComponent error
    pub fn unknown_component(
        dest: &Destination,
        pipeline: impl Into<String>,
        kind: ComponentKind,
        name: impl Into<String>,
    ) -> Self {
        Self::UnknownComponent {
            destination: dest.id.clone(),
            destination_type: dest.dest_type.clone(),
            pipeline: pipeline.into(),
            kind,
            name: name.into(),
        }
    }

    /// Attach destination identity to a registry or configurer error
    ///
    /// Duplicate-name rejections from the document become `NameConflict`
    /// and an unresolved type becomes `UnknownDestinationType`.
    pub fn from_destination(dest: &Destination, err: DestinationError) -> Self {
        if let DestinationError::Document(doc_err) = &err
            && let (Some(name), Some(kind)) = (doc_err.duplicate_name(), duplicate_kind(doc_err))
        {
            return Self::name_conflict(dest, kind, name);
        }

        match err {
            DestinationError::UnknownDestinationType {
                dest_type,
                available,
            } => Self::UnknownDestinationType {
                destination: dest.id.clone(),
                destination_type: dest_type,
                available,
            },
            other => Self::configurer(dest, other),
        }
    }

    fn configurer(dest: &Destination, source: DestinationError) -> Self {
        Self::Configurer {
            destination: dest.id.clone(),
            destination_type: dest.dest_type.clone(),
            source,
        }
    }

    /// Id and type of the destination that caused the error
    pub fn destination(&self) -> (&str, &DestinationType) {
        match self {
            Self::UnknownDestinationType {
                destination,
                destination_type,
                ..
            }
            | Self::NameConflict {
                destination,
                destination_type,
                ..
            }
            | Self::RemovedComponent {
                destination,
                destination_type,
                ..
            }
            | Self::UnknownComponent {
                destination,
                destination_type,
                ..
            }
            | Self::Configurer {
                destination,
                destination_type,
                ..
            } => (destination, destination_type),
        }
    }
}

fn duplicate_kind(err: &ConfigError) -> Option<ComponentKind> {
    match err {
        ConfigError::DuplicateExporter { .. } => Some(ComponentKind::Exporter),
        ConfigError::DuplicatePipeline { .. } => Some(ComponentKind::Pipeline),
        _ => None,
    }
}
