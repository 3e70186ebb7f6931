use chronospan_core::ClockSample;
use chronospan_ports::Clock;
use log::warn;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct ManualState {
    wall_ms: f64,
    monotonic_ms: f64,
    origin_ms: f64,
}

/// Fully controllable clock for deterministic tests and replays
///
/// Nothing moves unless told to. `advance` moves wall and monotonic time
/// together; `jump_wall` moves only the wall clock, the way an NTP step does.
pub struct ManualClock {
    state: RwLock<ManualState>,
}

impl ManualClock {
    /// Create a clock whose timelines agree: `wall = origin + monotonic`
    pub fn new(origin_ms: f64, monotonic_ms: f64) -> Arc<Self> {
        Self::with_skew(origin_ms, monotonic_ms, 0.0)
    }

    /// Create a clock whose wall time is `skew_ms` ahead of `origin + monotonic`
    pub fn with_skew(origin_ms: f64, monotonic_ms: f64, skew_ms: f64) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ManualState {
                wall_ms: origin_ms + monotonic_ms + skew_ms,
                monotonic_ms,
                origin_ms,
            }),
        })
    }

    /// Let `ms` elapse on both timelines
    pub fn advance(&self, ms: f64) {
        if ms < 0.0 {
            warn!("ManualClock cannot advance backwards ({ms}ms), ignoring");
            return;
        }
        let mut state = self.state.write();
        state.wall_ms += ms;
        state.monotonic_ms += ms;
    }

    /// Step the wall clock by `delta_ms` (either sign) without touching monotonic time
    pub fn jump_wall(&self, delta_ms: f64) {
        self.state.write().wall_ms += delta_ms;
    }

    /// Move monotonic time forward to `monotonic_ms`; earlier values are refused
    pub fn set_monotonic_ms(&self, monotonic_ms: f64) {
        let mut state = self.state.write();
        if monotonic_ms < state.monotonic_ms {
            warn!(
                "ManualClock monotonic time cannot decrease ({} -> {}), ignoring",
                state.monotonic_ms, monotonic_ms
            );
            return;
        }
        state.monotonic_ms = monotonic_ms;
    }
}

impl Clock for ManualClock {
    fn wall_now_ms(&self) -> f64 {
        self.state.read().wall_ms
    }

    fn monotonic_now_ms(&self) -> f64 {
        self.state.read().monotonic_ms
    }

    fn origin_ms(&self) -> f64 {
        self.state.read().origin_ms
    }

    fn set_origin_ms(&self, origin_ms: f64) {
        self.state.write().origin_ms = origin_ms;
    }

    fn sample(&self) -> ClockSample {
        let state = self.state.read();
        ClockSample {
            wall_now_ms: state.wall_ms,
            monotonic_now_ms: state.monotonic_ms,
            origin_ms: state.origin_ms,
        }
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen_until_moved() {
        let clock = ManualClock::new(1_700_000_000_000.0, 1_000.0);
        assert_eq!(clock.wall_now_ms(), 1_700_000_001_000.0);
        assert_eq!(clock.wall_now_ms(), 1_700_000_001_000.0);

        clock.advance(500.0);
        let sample = clock.sample();
        assert_eq!(sample.wall_now_ms, 1_700_000_001_500.0);
        assert_eq!(sample.monotonic_now_ms, 1_500.0);
        assert_eq!(sample.skew_ms(), 0.0);
    }

    #[test]
    fn test_jump_wall_only_moves_wall() {
        let clock = ManualClock::new(1_000_000.0, 10.0);
        clock.jump_wall(-5_000.0);

        assert_eq!(clock.wall_now_ms(), 995_010.0);
        assert_eq!(clock.monotonic_now_ms(), 10.0);
        assert_eq!(clock.sample().skew_ms(), -5_000.0);
    }

    #[test]
    fn test_monotonic_never_decreases() {
        let clock = ManualClock::new(0.0, 100.0);
        clock.set_monotonic_ms(50.0);
        clock.advance(-10.0);
        assert_eq!(clock.monotonic_now_ms(), 100.0);

        clock.set_monotonic_ms(150.0);
        assert_eq!(clock.monotonic_now_ms(), 150.0);
    }

    #[test]
    fn test_with_skew() {
        let clock = ManualClock::with_skew(1_000.0, 0.0, 42.0);
        assert_eq!(clock.sample().skew_ms(), 42.0);
    }
}
