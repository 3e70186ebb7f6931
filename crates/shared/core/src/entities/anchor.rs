use serde::{Deserialize, Serialize};

use crate::values::HrTime;

/// Timing baseline captured once when a span starts and frozen afterwards
///
/// Every later instant of the span (events, end) is resolved against it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanAnchor {
    /// Canonical start timestamp
    pub start: HrTime,
    /// Whether the caller supplied the start explicitly
    pub provided_start: bool,
    /// Monotonic clock reading at creation (ms)
    pub monotonic_start_ms: f64,
    /// `wall_now - (monotonic_start + origin)` at creation (ms)
    pub performance_offset_ms: f64,
}

/// Span lifecycle state
///
/// `Created` only exists while the anchor is being computed; a constructed
/// span is always `Recording` or `Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanState {
    Created,
    Recording,
    Ended,
}

impl SpanState {
    /// Returns true if no further mutation is accepted
    pub fn is_terminal(&self) -> bool {
        matches!(self, SpanState::Ended)
    }
}
