//! Prometheus remote write (metrics only)

use super::http_url;
use crate::{
    Configurer, Result, add_exporter_with_pipelines, metrics_enabled, required_data, secret_ref,
};
use conduit_config::{ConfigDocument, Destination, DestinationType, ExporterSettings, Signal, SignalSet};

const PROMETHEUS: DestinationType = DestinationType::from_static("prometheus");
const PROMETHEUS_REMOTEWRITE_URL: &str = "PROMETHEUS_REMOTEWRITE_URL";
const PROMETHEUS_BEARER_TOKEN: &str = "PROMETHEUS_BEARER_TOKEN";

/// Configurer for any Prometheus remote-write receiver (Prometheus, Mimir,
/// Thanos, Cortex)
///
/// | Key | Kind | Required |
/// |---|---|---|
/// | `PROMETHEUS_REMOTEWRITE_URL` | data | yes |
/// | `PROMETHEUS_BEARER_TOKEN` | secret | no; sent as `Authorization: Bearer` |
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusConfigurer;

impl Configurer for PrometheusConfigurer {
    fn destination_type(&self) -> DestinationType {
        PROMETHEUS
    }

    fn display_name(&self) -> &'static str {
        "Prometheus"
    }

    fn supported_signals(&self) -> SignalSet {
        SignalSet::only(Signal::Metrics)
    }

    fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
        if !metrics_enabled(dest) {
            return Ok(());
        }

        let raw = required_data(dest, PROMETHEUS_REMOTEWRITE_URL)?;
        let url = http_url(&dest.dest_type, PROMETHEUS_REMOTEWRITE_URL, raw)?;

        let mut settings = ExporterSettings::with_endpoint(url);
        if dest.has_secret(PROMETHEUS_BEARER_TOKEN) {
            let token = secret_ref(dest, PROMETHEUS_BEARER_TOKEN)?;
            settings = settings.header("Authorization", format!("Bearer {}", token));
        }

        add_exporter_with_pipelines(
            doc,
            dest,
            SignalSet::only(Signal::Metrics),
            "prometheusremotewrite",
            settings,
        )
    }
}
