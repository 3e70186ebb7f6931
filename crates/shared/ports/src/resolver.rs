use chronospan_core::{HrTime, SpanAnchor, TimeInput};

use crate::Clock;

/// Strategy turning caller-supplied time inputs into canonical span timestamps
///
/// Composed into a tracer at construction. `anchor` runs once when a span
/// starts; `resolve` runs for every later instant (events and end) against
/// the frozen anchor.
pub trait TimeResolver: Send + Sync {
    /// Resolve the start of a span and capture its timing baseline
    fn anchor(&self, clock: &dyn Clock, input: Option<TimeInput>) -> SpanAnchor;

    /// Resolve an instant after the start
    fn resolve(&self, clock: &dyn Clock, anchor: &SpanAnchor, input: Option<TimeInput>) -> HrTime;

    fn name(&self) -> &str {
        "TimeResolver"
    }
}
