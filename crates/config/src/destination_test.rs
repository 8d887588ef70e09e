//! Tests for destination descriptors

use super::*;

// =============================================================================
// Signal
// =============================================================================

#[test]
fn test_signal_names() {
    assert_eq!(Signal::Traces.as_str(), "traces");
    assert_eq!(Signal::Metrics.as_str(), "metrics");
    assert_eq!(Signal::Logs.as_str(), "logs");
    assert_eq!(Signal::Logs.to_string(), "logs");
}

#[test]
fn test_signal_from_str() {
    assert_eq!("traces".parse::<Signal>().unwrap(), Signal::Traces);
    assert_eq!("metrics".parse::<Signal>().unwrap(), Signal::Metrics);
    assert_eq!("logs".parse::<Signal>().unwrap(), Signal::Logs);

    let err = "profiles".parse::<Signal>().unwrap_err();
    assert!(err.to_string().contains("profiles"));
}

// =============================================================================
// SignalSet
// =============================================================================

#[test]
fn test_empty_set() {
    let set = SignalSet::default();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert_eq!(set, SignalSet::EMPTY);
    for signal in Signal::ALL {
        assert!(!set.contains(signal));
    }
}

#[test]
fn test_insert_and_contains() {
    let mut set = SignalSet::EMPTY;
    set.insert(Signal::Logs);
    set.insert(Signal::Logs);

    assert_eq!(set.len(), 1);
    assert!(set.contains(Signal::Logs));
    assert!(!set.contains(Signal::Traces));
}

#[test]
fn test_iteration_order_is_fixed() {
    let set: SignalSet = [Signal::Logs, Signal::Traces, Signal::Metrics]
        .into_iter()
        .collect();
    let order: Vec<Signal> = set.iter().collect();
    assert_eq!(order, vec![Signal::Traces, Signal::Metrics, Signal::Logs]);
    assert_eq!(set, SignalSet::ALL);
}

#[test]
fn test_intersection_and_difference() {
    let enabled = SignalSet::only(Signal::Traces).with(Signal::Logs);
    let supported = SignalSet::only(Signal::Traces);

    assert_eq!(enabled.intersection(supported), SignalSet::only(Signal::Traces));
    assert_eq!(enabled.difference(supported), SignalSet::only(Signal::Logs));
    assert!(supported.difference(enabled).is_empty());
}

#[test]
fn test_set_display_and_debug() {
    let set = SignalSet::only(Signal::Metrics).with(Signal::Traces);
    assert_eq!(set.to_string(), "traces,metrics");
    assert_eq!(format!("{:?}", set), "{Traces, Metrics}");
}

#[test]
fn test_set_deserialize() {
    #[derive(Deserialize)]
    struct Wrapper {
        signals: SignalSet,
    }

    let w: Wrapper = toml::from_str(r#"signals = ["logs", "traces"]"#).unwrap();
    assert!(w.signals.contains(Signal::Logs));
    assert!(w.signals.contains(Signal::Traces));
    assert!(!w.signals.contains(Signal::Metrics));

    let w: Wrapper = toml::from_str("signals = []").unwrap();
    assert!(w.signals.is_empty());

    let bad: Result<Wrapper, _> = toml::from_str(r#"signals = ["spans"]"#);
    assert!(bad.is_err());
}

#[test]
fn test_set_serialize() {
    let set = SignalSet::only(Signal::Logs).with(Signal::Traces);
    let yaml = serde_yaml::to_string(&set).unwrap();
    assert_eq!(yaml, "- traces\n- logs\n");
}

// =============================================================================
// DestinationType
// =============================================================================

#[test]
fn test_static_and_owned_types_are_equal() {
    const JAEGER: DestinationType = DestinationType::from_static("jaeger");
    let owned = DestinationType::new(String::from("jaeger"));

    assert_eq!(JAEGER, owned);
    assert_eq!(JAEGER, "jaeger");
    assert_eq!(owned.as_str(), "jaeger");
    assert_eq!(owned.to_string(), "jaeger");
}

#[test]
fn test_type_hash_matches_across_ownership() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(DestinationType::from_static("loki"));
    assert!(set.contains(&DestinationType::new("loki")));
}

// =============================================================================
// Destination
// =============================================================================

#[test]
fn test_builder() {
    let dest = Destination::new("hc-prod", "honeycomb")
        .with_signal(Signal::Traces)
        .with_data("HONEYCOMB_ENDPOINT", "api.honeycomb.io:443")
        .with_secret("HONEYCOMB_API_KEY", "hcaik_123");

    assert_eq!(dest.id, "hc-prod");
    assert_eq!(dest.dest_type, "honeycomb");
    assert!(dest.is_enabled(Signal::Traces));
    assert!(!dest.is_enabled(Signal::Logs));
    assert_eq!(dest.data("HONEYCOMB_ENDPOINT"), Some("api.honeycomb.io:443"));
    assert!(dest.has_secret("HONEYCOMB_API_KEY"));
    assert_eq!(dest.secret_keys().collect::<Vec<_>>(), vec!["HONEYCOMB_API_KEY"]);
}

#[test]
fn test_blank_values_count_as_missing() {
    let dest = Destination::new("j", "jaeger")
        .with_data("JAEGER_URL", "   ")
        .with_secret("TOKEN", "");

    assert_eq!(dest.data("JAEGER_URL"), None);
    assert_eq!(dest.data("NOT_SET"), None);
    assert!(!dest.has_secret("TOKEN"));
}

#[test]
fn test_data_is_trimmed() {
    let dest = Destination::new("j", "jaeger").with_data("JAEGER_URL", " jaeger:4317 \n");
    assert_eq!(dest.data("JAEGER_URL"), Some("jaeger:4317"));
}

#[test]
fn test_debug_redacts_secrets() {
    let dest = Destination::new("dd", "datadog").with_secret("DATADOG_API_KEY", "super-secret-value");
    let debug = format!("{:?}", dest);

    assert!(debug.contains("DATADOG_API_KEY"));
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains("super-secret-value"));
}

#[test]
fn test_deserialize_minimal() {
    let dest: Destination = toml::from_str(
        r#"
id = "j1"
type = "jaeger"
"#,
    )
    .unwrap();

    assert_eq!(dest.id, "j1");
    assert_eq!(dest.dest_type, "jaeger");
    assert!(dest.signals.is_empty());
    assert!(dest.data.is_empty());
    assert!(dest.secret_data.is_empty());
}

#[test]
fn test_deserialize_tolerates_unknown_keys() {
    let dest: Destination = toml::from_str(
        r#"
id = "hc"
type = "honeycomb"
signals = ["traces", "metrics"]

[data]
HONEYCOMB_ENDPOINT = "api.eu1.honeycomb.io:443"
SOMETHING_NEW = "ignored"

[secret_data]
HONEYCOMB_API_KEY = "k"
"#,
    )
    .unwrap();

    assert_eq!(dest.signals.len(), 2);
    assert_eq!(dest.data.len(), 2);
    assert_eq!(dest.data("SOMETHING_NEW"), Some("ignored"));
    assert!(dest.has_secret("HONEYCOMB_API_KEY"));
}
