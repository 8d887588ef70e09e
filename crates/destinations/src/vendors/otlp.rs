//! Generic OTLP/gRPC endpoint
//!
//! For any backend or downstream collector that speaks OTLP over gRPC.

use super::{OTLP_GRPC_PORT, flag, grpc_endpoint};
use crate::{Configurer, Result, add_exporter_with_pipelines, required_data, secret_ref};
use conduit_config::{
    ConfigDocument, Destination, DestinationType, ExporterSettings, SignalSet, TlsSettings,
};

const OTLP: DestinationType = DestinationType::from_static("otlp");
const OTLP_GRPC_ENDPOINT: &str = "OTLP_GRPC_ENDPOINT";
const OTLP_GRPC_TLS_ENABLED: &str = "OTLP_GRPC_TLS_ENABLED";
const OTLP_GRPC_AUTH_HEADER: &str = "OTLP_GRPC_AUTH_HEADER";
const OTLP_GRPC_AUTH_TOKEN: &str = "OTLP_GRPC_AUTH_TOKEN";

/// Configurer for a generic OTLP/gRPC endpoint
///
/// | Key | Kind | Required |
/// |---|---|---|
/// | `OTLP_GRPC_ENDPOINT` | data | yes |
/// | `OTLP_GRPC_TLS_ENABLED` | data | no, default false |
/// | `OTLP_GRPC_AUTH_HEADER` | data | no; header carrying the token |
/// | `OTLP_GRPC_AUTH_TOKEN` | secret | when `OTLP_GRPC_AUTH_HEADER` is set |
#[derive(Debug, Clone, Copy, Default)]
pub struct OtlpConfigurer;

impl Configurer for OtlpConfigurer {
    fn destination_type(&self) -> DestinationType {
        OTLP
    }

    fn display_name(&self) -> &'static str {
        "OTLP gRPC"
    }

    fn modify_config(&self, dest: &Destination, doc: &mut ConfigDocument) -> Result<()> {
        let signals = dest.signals.intersection(SignalSet::ALL);
        if signals.is_empty() {
            return Ok(());
        }

        let raw = required_data(dest, OTLP_GRPC_ENDPOINT)?;
        let endpoint = grpc_endpoint(&dest.dest_type, OTLP_GRPC_ENDPOINT, raw, OTLP_GRPC_PORT)?;
        let tls_enabled = flag(
            &dest.dest_type,
            OTLP_GRPC_TLS_ENABLED,
            dest.data(OTLP_GRPC_TLS_ENABLED),
        )?;

        let mut settings = ExporterSettings::with_endpoint(endpoint);
        if !tls_enabled {
            settings = settings.tls(TlsSettings::insecure());
        }
        if let Some(header) = dest.data(OTLP_GRPC_AUTH_HEADER) {
            settings = settings.header(header, secret_ref(dest, OTLP_GRPC_AUTH_TOKEN)?);
        }

        add_exporter_with_pipelines(doc, dest, signals, "otlp", settings)
    }
}
