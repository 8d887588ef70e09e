//! Built-in destination configurers
//!
//! One module per vendor. Each configurer is a unit struct; all state comes
//! from the destination descriptor.

mod datadog;
mod honeycomb;
mod jaeger;
mod loki;
mod otlp;
mod prometheus;

pub use datadog::DatadogConfigurer;
pub use honeycomb::HoneycombConfigurer;
pub use jaeger::JaegerConfigurer;
pub use loki::LokiConfigurer;
pub use otlp::OtlpConfigurer;
pub use prometheus::PrometheusConfigurer;

use crate::{DestinationError, Result};
use conduit_config::DestinationType;

/// Default OTLP/gRPC port
pub(crate) const OTLP_GRPC_PORT: u16 = 4317;

/// Normalize a gRPC endpoint to `[scheme://]host:port`
///
/// A missing port is filled in with `default_port`. `http://`, `https://`
/// and `grpc://` prefixes are accepted; `grpc://` is dropped since the
/// collector's gRPC client doesn't understand it.
pub(crate) fn grpc_endpoint(
    dest_type: &DestinationType,
    field: &str,
    raw: &str,
    default_port: u16,
) -> Result<String> {
    let invalid = |message: &str| DestinationError::invalid_value(dest_type, field, message);

    let (scheme, rest) = match raw.split_once("://") {
        Some(("http", rest)) => ("http://", rest),
        Some(("https", rest)) => ("https://", rest),
        Some(("grpc", rest)) => ("", rest),
        Some((other, _)) => {
            return Err(invalid(&format!("unsupported scheme '{}'", other)));
        }
        None => ("", raw),
    };

    let host_port = rest.trim_end_matches('/');
    if host_port.is_empty() {
        return Err(invalid("missing host"));
    }
    if host_port.contains('/') || host_port.chars().any(char::is_whitespace) {
        return Err(invalid("expected host[:port] without a path"));
    }

    match host_port.rsplit_once(':') {
        Some((host, port)) => {
            if host.is_empty() {
                return Err(invalid("missing host"));
            }
            port.parse::<u16>()
                .map_err(|_| invalid(&format!("invalid port '{}'", port)))?;
            Ok(format!("{}{}", scheme, host_port))
        }
        None => Ok(format!("{}{}:{}", scheme, host_port, default_port)),
    }
}

/// Require an `http://` or `https://` URL
pub(crate) fn http_url<'a>(dest_type: &DestinationType, field: &str, raw: &'a str) -> Result<&'a str> {
    let has_host = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'));

    if !has_host {
        return Err(DestinationError::invalid_value(
            dest_type,
            field,
            "must be an http:// or https:// URL",
        ));
    }
    Ok(raw)
}

/// Parse a boolean flag stored as a string
pub(crate) fn flag(dest_type: &DestinationType, field: &str, raw: Option<&str>) -> Result<bool> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(_) => Err(DestinationError::invalid_value(
            dest_type,
            field,
            "must be true or false",
        )),
    }
}
