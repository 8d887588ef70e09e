//! Destination descriptors
//!
//! A destination is a user-configured telemetry sink (a tracing backend, a
//! log store, a metrics database, ...). The descriptor is passive data read
//! from an external store; the logic that turns it into exporters and
//! pipelines lives with the destination configurers.
//!
//! # Example
//!
//! ```toml
//! [[destinations]]
//! id = "hc-prod"
//! type = "honeycomb"
//! signals = ["traces", "logs"]
//!
//! [destinations.data]
//! HONEYCOMB_ENDPOINT = "api.honeycomb.io:443"
//!
//! [destinations.secret_data]
//! HONEYCOMB_API_KEY = "..."
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Telemetry signal category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Distributed traces
    Traces,
    /// Metrics
    Metrics,
    /// Logs
    Logs,
}

impl Signal {
    /// All signals, in pipeline emission order
    pub const ALL: [Signal; 3] = [Signal::Traces, Signal::Metrics, Signal::Logs];

    /// Lowercase name, also used as the pipeline name prefix
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Traces => "traces",
            Self::Metrics => "metrics",
            Self::Logs => "logs",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Traces => 0b001,
            Self::Metrics => 0b010,
            Self::Logs => 0b100,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traces" => Ok(Self::Traces),
            "metrics" => Ok(Self::Metrics),
            "logs" => Ok(Self::Logs),
            other => Err(ConfigError::invalid_value(
                "signal",
                other,
                "name",
                "must be one of: traces, metrics, logs",
            )),
        }
    }
}

/// A set of signals
///
/// `Copy` and one byte wide. Serialized as a list of signal names, e.g.
/// `["traces", "logs"]`. Iteration always yields traces, metrics, logs in
/// that order regardless of insertion order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Signal>", into = "Vec<Signal>")]
pub struct SignalSet(u8);

impl SignalSet {
    /// No signals
    pub const EMPTY: SignalSet = SignalSet(0);

    /// Traces, metrics and logs
    pub const ALL: SignalSet = SignalSet(0b111);

    /// A set holding a single signal
    #[inline]
    #[must_use]
    pub const fn only(signal: Signal) -> Self {
        Self(signal.bit())
    }

    /// Return a copy of this set with `signal` added
    #[inline]
    #[must_use]
    pub const fn with(self, signal: Signal) -> Self {
        Self(self.0 | signal.bit())
    }

    /// Add a signal in place
    #[inline]
    pub fn insert(&mut self, signal: Signal) {
        self.0 |= signal.bit();
    }

    /// Check membership
    #[inline]
    pub const fn contains(self, signal: Signal) -> bool {
        self.0 & signal.bit() != 0
    }

    /// Signals present in both sets
    #[inline]
    #[must_use]
    pub const fn intersection(self, other: SignalSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Signals present in `self` but not in `other`
    #[inline]
    #[must_use]
    pub const fn difference(self, other: SignalSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// Check if no signal is set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of signals in the set
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in traces, metrics, logs order
    pub fn iter(self) -> impl Iterator<Item = Signal> {
        Signal::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl fmt::Debug for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Signal::as_str).collect();
        f.write_str(&names.join(","))
    }
}

impl From<Signal> for SignalSet {
    fn from(signal: Signal) -> Self {
        Self::only(signal)
    }
}

impl FromIterator<Signal> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, SignalSet::with)
    }
}

impl From<Vec<Signal>> for SignalSet {
    fn from(signals: Vec<Signal>) -> Self {
        signals.into_iter().collect()
    }
}

impl From<SignalSet> for Vec<Signal> {
    fn from(set: SignalSet) -> Self {
        set.iter().collect()
    }
}

/// Destination type tag (e.g. "jaeger", "honeycomb")
///
/// Built-in vendors use `from_static` so the tag can live in a `const`;
/// tags read from input are owned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DestinationType(Cow<'static, str>);

impl DestinationType {
    /// Create a type tag from a static string
    #[inline]
    #[must_use]
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    /// Create a type tag from an owned string
    #[inline]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    /// Get the tag as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DestinationType {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<&str> for DestinationType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<DestinationType> for String {
    fn from(tag: DestinationType) -> Self {
        tag.0.into_owned()
    }
}

impl PartialEq<str> for DestinationType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for DestinationType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A configured destination
///
/// Fields mirror the externally stored record. Unknown keys in `data` and
/// `secret_data` are kept but ignored by configurers that don't use them.
///
/// `Debug` output never includes secret values.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Destination {
    /// Identity of the destination in the external store
    pub id: String,

    /// Vendor type tag, selects the configurer
    #[serde(rename = "type")]
    pub dest_type: DestinationType,

    /// Signals the user enabled
    #[serde(default)]
    pub signals: SignalSet,

    /// Non-secret settings (endpoints, regions, labels)
    #[serde(default)]
    pub data: BTreeMap<String, String>,

    /// Secret settings (API keys, tokens)
    #[serde(default)]
    pub secret_data: BTreeMap<String, String>,
}

impl Destination {
    /// Create a destination with no signals and no data
    pub fn new(id: impl Into<String>, dest_type: impl Into<DestinationType>) -> Self {
        Self {
            id: id.into(),
            dest_type: dest_type.into(),
            signals: SignalSet::EMPTY,
            data: BTreeMap::new(),
            secret_data: BTreeMap::new(),
        }
    }

    /// Enable a signal
    #[must_use]
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.insert(signal);
        self
    }

    /// Replace the enabled signal set
    #[must_use]
    pub fn with_signals(mut self, signals: SignalSet) -> Self {
        self.signals = signals;
        self
    }

    /// Add a non-secret setting
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Add a secret setting
    #[must_use]
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secret_data.insert(key.into(), value.into());
        self
    }

    /// Check if a signal is enabled
    #[inline]
    pub fn is_enabled(&self, signal: Signal) -> bool {
        self.signals.contains(signal)
    }

    /// Get a non-secret setting
    ///
    /// Blank values count as missing: stores tend to persist cleared form
    /// fields as empty strings.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Check if a non-blank secret is present under `key`
    pub fn has_secret(&self, key: &str) -> bool {
        self.secret_data
            .get(key)
            .is_some_and(|v| !v.trim().is_empty())
    }

    /// Iterate over secret keys (never values)
    pub fn secret_keys(&self) -> impl Iterator<Item = &str> {
        self.secret_data.keys().map(String::as_str)
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Redacted<'a>(&'a BTreeMap<String, String>);

        impl fmt::Debug for Redacted<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(self.0.keys().map(|k| (k, "<redacted>")))
                    .finish()
            }
        }

        f.debug_struct("Destination")
            .field("id", &self.id)
            .field("dest_type", &self.dest_type)
            .field("signals", &self.signals)
            .field("data", &self.data)
            .field("secret_data", &Redacted(&self.secret_data))
            .finish()
    }
}

#[cfg(test)]
#[path = "destination_test.rs"]
mod tests;
