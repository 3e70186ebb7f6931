//! Span time resolution strategies
//!
//! Turns optional caller inputs into canonical span timestamps:
//! - [`DriftCorrectingResolver`] anchors clock-derived spans on the monotonic
//!   clock and corrects inputs that look skewed
//! - [`PassthroughResolver`] trusts every input and the wall clock as-is

use chronospan_core::{HrTime, SpanAnchor, TimeInput};
use chronospan_ports::{Clock, TimeResolver};
use log::debug;

/// Resolver that keeps span durations on the monotonic timeline
///
/// At span start it freezes the skew between the wall clock and the
/// origin-adjusted monotonic clock (`performance_offset_ms`). Later instants
/// of a clock-derived span are measured as monotonic elapsed time from the
/// start, so moving the clock origin mid-span (an NTP step, injected drift)
/// cannot stretch or shrink the span.
///
/// Numeric start inputs below the clock origin are taken to be monotonic
/// readings passed where epoch milliseconds were expected, and are shifted
/// by the performance offset. This is a heuristic: a genuine wall-clock
/// input older than the origin gets the same shift.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftCorrectingResolver;

impl DriftCorrectingResolver {
    pub fn new() -> Self {
        Self
    }
}

impl TimeResolver for DriftCorrectingResolver {
    fn anchor(&self, clock: &dyn Clock, input: Option<TimeInput>) -> SpanAnchor {
        let input = input.and_then(TimeInput::validated);
        let sample = clock.sample();
        let performance_offset_ms = sample.skew_ms();

        let start = match input {
            None => HrTime::from_millis(sample.wall_now_ms),
            Some(TimeInput::Millis(ms)) if ms < sample.origin_ms => {
                let corrected = ms + performance_offset_ms;
                debug!(
                    "Start input {ms}ms is below origin {}ms, treating as monotonic: corrected by {performance_offset_ms}ms to {corrected}ms",
                    sample.origin_ms
                );
                HrTime::from_millis(corrected)
            }
            Some(other) => other.to_hr_time(),
        };

        SpanAnchor {
            start,
            provided_start: input.is_some(),
            monotonic_start_ms: sample.monotonic_now_ms,
            performance_offset_ms,
        }
    }

    fn resolve(&self, clock: &dyn Clock, anchor: &SpanAnchor, input: Option<TimeInput>) -> HrTime {
        let provided = input
            .and_then(TimeInput::validated)
            .map(TimeInput::to_hr_time);

        if anchor.provided_start {
            // caller owns both ends of the span
            return provided.unwrap_or_else(|| HrTime::from_millis(clock.wall_now_ms()));
        }

        match provided {
            Some(time) if time.duration_since(anchor.start).is_negative() => {
                let corrected = time.add_millis(anchor.performance_offset_ms);
                debug!(
                    "Input {time} precedes start {}, corrected by {}ms to {corrected}",
                    anchor.start, anchor.performance_offset_ms
                );
                corrected
            }
            Some(time) => time,
            None => {
                let elapsed_ms = clock.monotonic_now_ms() - anchor.monotonic_start_ms;
                anchor.start.add_millis(elapsed_ms)
            }
        }
    }

    fn name(&self) -> &str {
        "DriftCorrectingResolver"
    }
}

/// Resolver that applies no correction
///
/// Explicit inputs are used verbatim and absent inputs read the wall clock,
/// so any wall-clock step during a span shows up in its duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl PassthroughResolver {
    pub fn new() -> Self {
        Self
    }
}

impl TimeResolver for PassthroughResolver {
    fn anchor(&self, clock: &dyn Clock, input: Option<TimeInput>) -> SpanAnchor {
        let input = input.and_then(TimeInput::validated);
        let sample = clock.sample();

        SpanAnchor {
            start: input
                .map(TimeInput::to_hr_time)
                .unwrap_or_else(|| HrTime::from_millis(sample.wall_now_ms)),
            provided_start: input.is_some(),
            monotonic_start_ms: sample.monotonic_now_ms,
            performance_offset_ms: sample.skew_ms(),
        }
    }

    fn resolve(&self, clock: &dyn Clock, _anchor: &SpanAnchor, input: Option<TimeInput>) -> HrTime {
        input
            .and_then(TimeInput::validated)
            .map(TimeInput::to_hr_time)
            .unwrap_or_else(|| HrTime::from_millis(clock.wall_now_ms()))
    }

    fn name(&self) -> &str {
        "PassthroughResolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronospan_clock::ManualClock;

    const ORIGIN: f64 = 1_700_000_000_000.0;

    fn ms(time: HrTime) -> f64 {
        time.to_millis()
    }

    #[test]
    fn test_anchor_without_input_uses_wall_clock() {
        let clock = ManualClock::new(ORIGIN, 1_000.0);
        let anchor = DriftCorrectingResolver.anchor(clock.as_ref(), None);

        assert_eq!(ms(anchor.start), 1_700_000_001_000.0);
        assert!(!anchor.provided_start);
        assert_eq!(anchor.monotonic_start_ms, 1_000.0);
        assert_eq!(anchor.performance_offset_ms, 0.0);
    }

    #[test]
    fn test_anchor_captures_skew() {
        let clock = ManualClock::with_skew(ORIGIN, 1_000.0, 250.0);
        let anchor = DriftCorrectingResolver.anchor(clock.as_ref(), None);

        assert_eq!(anchor.performance_offset_ms, 250.0);
        assert_eq!(ms(anchor.start), 1_700_000_001_250.0);
    }

    #[test]
    fn test_numeric_start_below_origin_is_treated_as_monotonic() {
        let clock = ManualClock::with_skew(ORIGIN, 5_000.0, 40.0);
        let anchor = DriftCorrectingResolver.anchor(clock.as_ref(), Some(TimeInput::Millis(4_000.0)));

        // input + offset, not rebased onto the origin
        assert_eq!(ms(anchor.start), 4_040.0);
        assert!(anchor.provided_start);
    }

    #[test]
    fn test_numeric_start_above_origin_used_as_epoch() {
        let clock = ManualClock::with_skew(ORIGIN, 5_000.0, 40.0);
        let input = ORIGIN + 1_234.5;
        let anchor = DriftCorrectingResolver.anchor(clock.as_ref(), Some(input.into()));

        assert_eq!(ms(anchor.start), input);
    }

    #[test]
    fn test_split_start_never_reinterpreted() {
        let clock = ManualClock::new(ORIGIN, 5_000.0);
        let input = HrTime::new(3, 0);
        let anchor = DriftCorrectingResolver.anchor(clock.as_ref(), Some(input.into()));

        assert_eq!(anchor.start, input);
    }

    #[test]
    fn test_malformed_start_treated_as_absent() {
        let clock = ManualClock::new(ORIGIN, 1_000.0);
        let anchor = DriftCorrectingResolver.anchor(clock.as_ref(), Some(TimeInput::Millis(f64::NAN)));

        assert!(!anchor.provided_start);
        assert_eq!(ms(anchor.start), ORIGIN + 1_000.0);
    }

    #[test]
    fn test_provided_start_uses_inputs_verbatim_or_wall() {
        let clock = ManualClock::new(ORIGIN, 60_000.0);
        let anchor =
            DriftCorrectingResolver.anchor(clock.as_ref(), Some((ORIGIN + 10_000.0).into()));

        // an earlier explicit input is not corrected when the start was explicit
        let explicit = DriftCorrectingResolver.resolve(
            clock.as_ref(),
            &anchor,
            Some((ORIGIN + 5_000.0).into()),
        );
        assert_eq!(ms(explicit), ORIGIN + 5_000.0);

        clock.jump_wall(123.0);
        let implicit = DriftCorrectingResolver.resolve(clock.as_ref(), &anchor, None);
        assert_eq!(ms(implicit), ORIGIN + 60_123.0);
    }

    #[test]
    fn test_clock_derived_span_tracks_monotonic_elapsed() {
        let clock = ManualClock::new(ORIGIN, 1_000.0);
        let resolver = DriftCorrectingResolver;
        let anchor = resolver.anchor(clock.as_ref(), None);

        clock.set_origin_ms(ORIGIN - 21_600_000.0);
        clock.jump_wall(-21_600_000.0);
        clock.advance(500.0);

        let end = resolver.resolve(clock.as_ref(), &anchor, None);
        assert_eq!(end.duration_since(anchor.start), HrTime::new(0, 500_000_000));
    }

    #[test]
    fn test_explicit_input_before_start_corrected_by_offset() {
        let clock = ManualClock::with_skew(ORIGIN, 1_000.0, 300.0);
        let resolver = DriftCorrectingResolver;
        let anchor = resolver.anchor(clock.as_ref(), None);

        // start is at wall time (origin + 1000 + 300); the input lacks the skew
        let input = ORIGIN + 1_100.0;
        let resolved = resolver.resolve(clock.as_ref(), &anchor, Some(input.into()));
        assert_eq!(ms(resolved), input + 300.0);

        let later = ORIGIN + 2_000.0;
        let resolved = resolver.resolve(clock.as_ref(), &anchor, Some(later.into()));
        assert_eq!(ms(resolved), later);
    }

    #[test]
    fn test_passthrough_follows_wall_clock_steps() {
        let clock = ManualClock::new(ORIGIN, 1_000.0);
        let resolver = PassthroughResolver;
        let anchor = resolver.anchor(clock.as_ref(), None);

        clock.advance(500.0);
        clock.jump_wall(2_000.0);

        let end = resolver.resolve(clock.as_ref(), &anchor, None);
        assert_eq!(end.duration_since(anchor.start).to_millis(), 2_500.0);
    }
}
