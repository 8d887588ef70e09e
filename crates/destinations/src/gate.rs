//! Signal gate
//!
//! Pure predicates deciding which signals a destination asked for. A signal
//! that is absent from the descriptor is off.

use conduit_config::{Destination, Signal, SignalSet};

/// Whether the destination wants traces
#[inline]
pub fn tracing_enabled(dest: &Destination) -> bool {
    dest.is_enabled(Signal::Traces)
}

/// Whether the destination wants metrics
#[inline]
pub fn metrics_enabled(dest: &Destination) -> bool {
    dest.is_enabled(Signal::Metrics)
}

/// Whether the destination wants logs
#[inline]
pub fn logging_enabled(dest: &Destination) -> bool {
    dest.is_enabled(Signal::Logs)
}

/// Whether `signal` is enabled
#[inline]
pub fn signal_enabled(dest: &Destination, signal: Signal) -> bool {
    match signal {
        Signal::Traces => tracing_enabled(dest),
        Signal::Metrics => metrics_enabled(dest),
        Signal::Logs => logging_enabled(dest),
    }
}

/// Split the destination's signals into those `supported` allows and those
/// it doesn't
///
/// Returns `(kept, dropped)`.
pub fn partition(dest: &Destination, supported: SignalSet) -> (SignalSet, SignalSet) {
    let kept = Signal::ALL
        .into_iter()
        .filter(|s| signal_enabled(dest, *s) && supported.contains(*s))
        .collect();
    (kept, dest.signals.difference(supported))
}
