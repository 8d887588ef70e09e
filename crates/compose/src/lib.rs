//! Conduit - Composition
//!
//! Builds the final collector document from a base document and a list of
//! destination descriptors.
//!
//! # Example
//!
//! ```
//! use conduit_compose::Composer;
//! use conduit_config::{ConfigDocument, Destination, Signal};
//!
//! let base = ConfigDocument::from_yaml_str(
//!     "receivers: {otlp: {}}\nprocessors: {batch: {}}\n",
//! )
//! .unwrap();
//!
//! let jaeger = Destination::new("jaeger-local", "jaeger")
//!     .with_signal(Signal::Traces)
//!     .with_data("JAEGER_URL", "jaeger:4317");
//!
//! let composer = Composer::builtin().unwrap();
//! let doc = composer.compose(&base, &[jaeger]).unwrap();
//!
//! assert!(doc.exporter("otlp/jaeger").is_some());
//! assert!(doc.pipeline("traces/jaeger").is_some());
//! ```

mod composer;
mod error;

pub use composer::Composer;
pub use error::{ComposeError, Result};
