//! Datadog
//!
//! Uses the collector's native `datadog` exporter, which takes the API key
//! and intake site under an `api` block instead of an endpoint.

use crate::{Configurer, DestinationError, Result, add_exporter_with_pipelines, required_data, secret_ref};
use conduit_config::{ConfigDocument, Destination, DestinationType, ExporterSettings, SignalSet};
use serde_yaml::{Mapping, Value};

const DATADOG: DestinationType = DestinationType::from_static("datadog");
const DATADOG_SITE: &str = "DATADOG_SITE";
const DATADOG_API_KEY: &str = "DATADOG_API_KEY";

/// Configurer for Datadog
///
/// | Key | Kind | Required |
/// |---|---|---|
/// | `DATADOG_SITE` | data | yes, e.g. `datadoghq.com`, `datadoghq.eu` |
/// | `DATADOG_API_KEY` | secret | yes |
#[derive(Debug, Clone, Copy, Default)]
pub struct DatadogConfigurer;

impl Configurer for DatadogConfigurer {
    fn destination_type(&self) -> DestinationType {
        DATADOG
    }

    fn display_name(&self) -> &'static str {
        "Datadog"
    }

    fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
        let signals = dest.signals.intersection(SignalSet::ALL);
        if signals.is_empty() {
            return Ok(());
        }

        let site = required_data(dest, DATADOG_SITE)?;
        if site.contains("://") || site.contains('/') {
            return Err(DestinationError::invalid_value(
                &dest.dest_type,
                DATADOG_SITE,
                "expected a bare site domain such as datadoghq.com",
            ));
        }
        let api_key = secret_ref(dest, DATADOG_API_KEY)?;

        let mut api = Mapping::new();
        api.insert(Value::from("key"), Value::from(api_key));
        api.insert(Value::from("site"), Value::from(site));

        let settings = ExporterSettings::new().set("api", api);
        add_exporter_with_pipelines(doc, dest, signals, "datadog", settings)
    }
}
