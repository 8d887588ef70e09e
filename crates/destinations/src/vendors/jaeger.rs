//! Jaeger
//!
//! Jaeger ingests OTLP natively, so traces go through a plain `otlp`
//! exporter. In-cluster Jaeger collectors don't terminate TLS.

use super::{OTLP_GRPC_PORT, grpc_endpoint};
use crate::{
    Configurer, Result, add_exporter_with_pipelines, required_data, tracing_enabled,
};
use conduit_config::{
    ConfigDocument, Destination, DestinationType, ExporterSettings, Signal, SignalSet, TlsSettings,
};

const JAEGER: DestinationType = DestinationType::from_static("jaeger");
const JAEGER_URL: &str = "JAEGER_URL";

/// Configurer for Jaeger (traces only)
///
/// | Key | Kind | Required |
/// |---|---|---|
/// | `JAEGER_URL` | data | yes; `host[:port]`, port defaults to 4317 |
#[derive(Debug, Clone, Copy, Default)]
pub struct JaegerConfigurer;

impl Configurer for JaegerConfigurer {
    fn destination_type(&self) -> DestinationType {
        JAEGER
    }

    fn display_name(&self) -> &'static str {
        "Jaeger"
    }

    fn supported_signals(&self) -> SignalSet {
        SignalSet::only(Signal::Traces)
    }

    fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
        if !tracing_enabled(dest) {
            return Ok(());
        }

        let url = required_data(dest, JAEGER_URL)?;
        let endpoint = grpc_endpoint(&dest.dest_type, JAEGER_URL, url, OTLP_GRPC_PORT)?;

        let settings = ExporterSettings::with_endpoint(endpoint).tls(TlsSettings::insecure());
        add_exporter_with_pipelines(doc, dest, SignalSet::only(Signal::Traces), "otlp", settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DestinationError;

    fn jaeger(url: &str) -> Destination {
        Destination::new("jaeger-1", "jaeger")
            .with_signal(Signal::Traces)
            .with_data(JAEGER_URL, url)
    }

    #[test]
    fn test_traces() {
        let mut doc = ConfigDocument::new();
        JaegerConfigurer
            .modify_config(&jaeger("jaeger.tracing"), &mut doc)
            .unwrap();

        let exporter = doc.exporter("otlp/jaeger").unwrap();
        assert_eq!(exporter.endpoint.as_deref(), Some("jaeger.tracing:4317"));
        assert_eq!(exporter.tls, Some(TlsSettings::insecure()));

        assert_eq!(doc.pipelines().len(), 1);
        assert_eq!(doc.pipeline("traces/jaeger").unwrap().exporters, vec!["otlp/jaeger"]);
    }

    #[test]
    fn test_disabled_adds_nothing_and_skips_validation() {
        let mut doc = ConfigDocument::new();
        let dest = Destination::new("jaeger-1", "jaeger");
        JaegerConfigurer.modify_config(&dest, &mut doc).unwrap();
        assert_eq!(doc, ConfigDocument::new());
    }

    #[test]
    fn test_missing_url() {
        let mut doc = ConfigDocument::new();
        let dest = Destination::new("jaeger-1", "jaeger").with_signal(Signal::Traces);
        let err = JaegerConfigurer.modify_config(&dest, &mut doc).unwrap_err();
        assert!(matches!(
            err,
            DestinationError::MissingRequiredField { ref field, .. } if field == JAEGER_URL
        ));
        assert!(doc.exporters().is_empty());
    }

    #[test]
    fn test_bad_url() {
        let mut doc = ConfigDocument::new();
        let err = JaegerConfigurer
            .modify_config(&jaeger("jaeger:notaport"), &mut doc)
            .unwrap_err();
        assert!(matches!(err, DestinationError::InvalidValue { .. }));
    }
}
