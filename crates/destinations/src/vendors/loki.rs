//! Grafana Loki (logs only)

use super::http_url;
use crate::{Configurer, Result, add_exporter_with_pipelines, logging_enabled, required_data};
use conduit_config::{ConfigDocument, Destination, DestinationType, ExporterSettings, Signal, SignalSet};

const LOKI: DestinationType = DestinationType::from_static("loki");
const LOKI_URL: &str = "LOKI_URL";
const LOKI_TENANT_ID: &str = "LOKI_TENANT_ID";

/// Configurer for Grafana Loki
///
/// | Key | Kind | Required |
/// |---|---|---|
/// | `LOKI_URL` | data | yes, full push URL |
/// | `LOKI_TENANT_ID` | data | no; sent as `X-Scope-OrgID` |
#[derive(Debug, Clone, Copy, Default)]
pub struct LokiConfigurer;

impl Configurer for LokiConfigurer {
    fn destination_type(&self) -> DestinationType {
        LOKI
    }

    fn display_name(&self) -> &'static str {
        "Loki"
    }

    fn supported_signals(&self) -> SignalSet {
        SignalSet::only(Signal::Logs)
    }

    fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
        if !logging_enabled(dest) {
            return Ok(());
        }

        let url = http_url(&dest.dest_type, LOKI_URL, required_data(dest, LOKI_URL)?)?;

        let mut settings = ExporterSettings::with_endpoint(url);
        if let Some(tenant) = dest.data(LOKI_TENANT_ID) {
            settings = settings.header("X-Scope-OrgID", tenant);
        }

        add_exporter_with_pipelines(doc, dest, SignalSet::only(Signal::Logs), "loki", settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DestinationError;

    const PUSH_URL: &str = "http://loki-gateway.monitoring:3100/loki/api/v1/push";

    #[test]
    fn test_logs() {
        let mut doc = ConfigDocument::new();
        let dest = Destination::new("loki", "loki")
            .with_signal(Signal::Logs)
            .with_data(LOKI_URL, PUSH_URL);
        LokiConfigurer.modify_config(&dest, &mut doc).unwrap();

        let exporter = doc.exporter("loki/loki").unwrap();
        assert_eq!(exporter.endpoint.as_deref(), Some(PUSH_URL));
        assert!(exporter.headers.is_empty());
        assert_eq!(doc.pipeline("logs/loki").unwrap().exporters, vec!["loki/loki"]);
        assert_eq!(doc.pipelines().len(), 1);
    }

    #[test]
    fn test_tenant_header() {
        let mut doc = ConfigDocument::new();
        let dest = Destination::new("loki", "loki")
            .with_signal(Signal::Logs)
            .with_data(LOKI_URL, PUSH_URL)
            .with_data(LOKI_TENANT_ID, "team-a");
        LokiConfigurer.modify_config(&dest, &mut doc).unwrap();

        let headers = &doc.exporter("loki/loki").unwrap().headers;
        assert_eq!(headers.get("X-Scope-OrgID").map(String::as_str), Some("team-a"));
    }

    #[test]
    fn test_traces_only_is_noop() {
        let mut doc = ConfigDocument::new();
        let dest = Destination::new("loki", "loki").with_signal(Signal::Traces);
        LokiConfigurer.modify_config(&dest, &mut doc).unwrap();
        assert!(doc.exporters().is_empty());
        assert!(doc.pipelines().is_empty());
    }

    #[test]
    fn test_url_must_be_http() {
        let mut doc = ConfigDocument::new();
        let dest = Destination::new("loki", "loki")
            .with_signal(Signal::Logs)
            .with_data(LOKI_URL, "loki:3100");
        let err = LokiConfigurer.modify_config(&dest, &mut doc).unwrap_err();
        assert!(matches!(err, DestinationError::InvalidValue { ref field, .. } if field == LOKI_URL));
    }
}
