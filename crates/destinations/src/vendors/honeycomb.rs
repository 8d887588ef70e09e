//! Honeycomb
//!
//! Honeycomb accepts OTLP/gRPC over TLS for every signal. The team API key
//! rides in the `x-honeycomb-team` header.

use super::{grpc_endpoint, http_url};
use crate::{Configurer, Result, add_exporter_with_pipelines, secret_ref};
use conduit_config::{ConfigDocument, Destination, DestinationType, ExporterSettings, SignalSet};

#[cfg(test)]
#[path = "honeycomb_test.rs"]
mod tests;

const HONEYCOMB: DestinationType = DestinationType::from_static("honeycomb");
const HONEYCOMB_API_KEY: &str = "HONEYCOMB_API_KEY";
const HONEYCOMB_ENDPOINT: &str = "HONEYCOMB_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "https://api.honeycomb.io";
const TLS_PORT: u16 = 443;

/// Configurer for Honeycomb
///
/// | Key | Kind | Required |
/// |---|---|---|
/// | `HONEYCOMB_API_KEY` | secret | yes |
/// | `HONEYCOMB_ENDPOINT` | data | no, default `https://api.honeycomb.io` |
#[derive(Debug, Clone, Copy, Default)]
pub struct HoneycombConfigurer;

impl Configurer for HoneycombConfigurer {
    fn destination_type(&self) -> DestinationType {
        HONEYCOMB
    }

    fn display_name(&self) -> &'static str {
        "Honeycomb"
    }

    fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
        let signals = dest.signals.intersection(SignalSet::ALL);
        if signals.is_empty() {
            return Ok(());
        }

        let api_key = secret_ref(dest, HONEYCOMB_API_KEY)?;
        let raw = match dest.data(HONEYCOMB_ENDPOINT) {
            Some(raw) => http_url(&dest.dest_type, HONEYCOMB_ENDPOINT, raw)?,
            None => DEFAULT_ENDPOINT,
        };
        let endpoint = grpc_endpoint(&dest.dest_type, HONEYCOMB_ENDPOINT, raw, TLS_PORT)?;

        let settings = ExporterSettings::with_endpoint(endpoint).header("x-honeycomb-team", api_key);
        add_exporter_with_pipelines(doc, dest, signals, "otlp", settings)
    }
}
