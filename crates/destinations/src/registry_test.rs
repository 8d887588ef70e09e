//! Tests for the configurer registry

use super::*;
use crate::{ConfigDocument, Destination, SignalSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Test configurer that counts how often it runs
struct CountingConfigurer {
    dest_type: &'static str,
    calls: Arc<AtomicUsize>,
}

impl CountingConfigurer {
    fn new(dest_type: &'static str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                dest_type,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl Configurer for CountingConfigurer {
    fn destination_type(&self) -> DestinationType {
        DestinationType::from_static(self.dest_type)
    }

    fn display_name(&self) -> &'static str {
        "Counting"
    }

    fn modify_config(&self, _dest: &Destination, _doc: &mut ConfigDocument) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_empty_registry() {
    let registry = ConfigurerRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.destination_types().is_empty());
    assert_eq!(registry.iter().count(), 0);
}

#[test]
fn test_register_and_resolve() {
    let mut registry = ConfigurerRegistry::new();
    registry.register(JaegerConfigurer).unwrap();

    assert!(!registry.is_empty());
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(&DestinationType::from_static("jaeger")));
    assert!(!registry.contains(&DestinationType::from_static("loki")));

    let configurer = registry
        .resolve(&DestinationType::new("jaeger"))
        .unwrap();
    assert_eq!(configurer.destination_type(), "jaeger");
}

#[test]
fn test_resolve_unknown_type() {
    let mut registry = ConfigurerRegistry::new();
    registry.register(LokiConfigurer).unwrap();
    registry.register(JaegerConfigurer).unwrap();

    let err = registry
        .resolve(&DestinationType::new("splunk"))
        .err()
        .unwrap();

    assert!(matches!(err, DestinationError::UnknownDestinationType { .. }));
    assert_eq!(
        err.to_string(),
        "unknown destination type 'splunk', available: [jaeger, loki]"
    );
}

#[test]
fn test_duplicate_registration_conflicts() {
    let mut registry = ConfigurerRegistry::new();
    registry.register(JaegerConfigurer).unwrap();

    let err = registry.register(JaegerConfigurer).unwrap_err();
    assert!(matches!(
        err,
        DestinationError::RegistrationConflict { ref dest_type } if dest_type == "jaeger"
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_conflict_keeps_first_binding() {
    let (first, first_calls) = CountingConfigurer::new("custom");
    let (second, second_calls) = CountingConfigurer::new("custom");

    let mut registry = ConfigurerRegistry::new();
    registry.register(first).unwrap();
    assert!(registry.register(second).is_err());

    let mut doc = ConfigDocument::new();
    let dest = Destination::new("c", "custom");
    registry
        .resolve(&dest.dest_type)
        .unwrap()
        .modify_config(&dest, &mut doc)
        .unwrap();

    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_register_boxed() {
    let mut registry = ConfigurerRegistry::new();
    let boxed: Box<dyn Configurer> = Box::new(HoneycombConfigurer);
    registry.register_boxed(boxed).unwrap();
    assert!(registry.contains(&DestinationType::from_static("honeycomb")));
}

#[test]
fn test_builtin_registry() {
    let registry = ConfigurerRegistry::builtin().unwrap();

    let types: Vec<&str> = registry
        .destination_types()
        .into_iter()
        .map(DestinationType::as_str)
        .collect();
    assert_eq!(
        types,
        vec!["datadog", "honeycomb", "jaeger", "loki", "otlp", "prometheus"]
    );
}

#[test]
fn test_iter_is_sorted() {
    let registry = ConfigurerRegistry::builtin().unwrap();
    let names: Vec<String> = registry
        .iter()
        .map(|c| c.destination_type().to_string())
        .collect();

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_builtin_supported_signals() {
    let registry = ConfigurerRegistry::builtin().unwrap();
    let supported = |t: &'static str| {
        registry
            .resolve(&DestinationType::from_static(t))
            .unwrap()
            .supported_signals()
    };

    assert_eq!(supported("jaeger"), SignalSet::only(crate::Signal::Traces));
    assert_eq!(supported("loki"), SignalSet::only(crate::Signal::Logs));
    assert_eq!(supported("prometheus"), SignalSet::only(crate::Signal::Metrics));
    assert_eq!(supported("honeycomb"), SignalSet::ALL);
}

#[test]
fn test_debug_lists_types() {
    let mut registry = ConfigurerRegistry::new();
    registry.register(LokiConfigurer).unwrap();
    let debug = format!("{:?}", registry);
    assert!(debug.contains("ConfigurerRegistry"));
    assert!(debug.contains("loki"));
}

#[test]
fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigurerRegistry>();
}
