//! Marker recognition.
//!
//! Matching is a closed set of spellings rather than open-ended symbol
//! lookup: when the host supplies a resolved symbol name its terminal
//! segment is matched, and otherwise the name as spelled at the use site is
//! compared. Every spelling is accepted with or without the conventional
//! `...Attribute` suffix.

use crate::corpus::MarkerUse;

/// Spelling of the container-level factory marker.
pub const METRIC_FACTORY: &str = "MetricFactory";

/// Long-form suffix tolerated on every marker spelling.
const ATTRIBUTE_SUFFIX: &str = "Attribute";

const COUNTER: &str = "Counter";
const GAUGE: &str = "Gauge";
const HISTOGRAM: &str = "Histogram";

/// The closed set of metric kinds a member function can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Monotonic count of events.
    Counter,
    /// Point-in-time value.
    Gauge,
    /// Distribution of observed values.
    Histogram,
}

impl MetricKind {
    /// Resolve one marker to a metric kind, preferring the host-resolved
    /// symbol identity over the spelled name.
    pub fn resolve(marker: &MarkerUse) -> Option<Self> {
        Self::from_spelling(marker_spelling(marker))
    }

    /// Resolve a member's markers to its metric kind.
    ///
    /// A member carrying more than one recognized marker resolves to the
    /// first recognized one in marker declaration order; unrecognized
    /// markers are skipped.
    pub fn resolve_first(markers: &[MarkerUse]) -> Option<Self> {
        markers.iter().find_map(Self::resolve)
    }

    /// Match one spelling, with or without the `...Attribute` suffix.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        match base_spelling(spelling) {
            COUNTER => Some(Self::Counter),
            GAUGE => Some(Self::Gauge),
            HISTOGRAM => Some(Self::Histogram),
            _ => None,
        }
    }
}

/// True when the marker names the container-level factory marker.
pub fn is_factory_marker(marker: &MarkerUse) -> bool {
    base_spelling(marker_spelling(marker)) == METRIC_FACTORY
}

fn marker_spelling(marker: &MarkerUse) -> &str {
    match marker.qualified_name.as_deref() {
        Some(qualified) => terminal_segment(qualified),
        None => &marker.name,
    }
}

fn base_spelling(spelling: &str) -> &str {
    match spelling.strip_suffix(ATTRIBUTE_SUFFIX) {
        // `Attribute` alone is not an alias of anything
        Some(base) if !base.is_empty() => base,
        _ => spelling,
    }
}

fn terminal_segment(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
