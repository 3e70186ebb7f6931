use chronospan_core::ClockSample;

/// Port for time abstraction
///
/// A clock source exposes two timelines:
/// - the wall clock, subject to NTP jumps and injected skew
/// - a monotonic clock, never decreasing and immune to such adjustment
///
/// `origin_ms` ties them together: it is the epoch time corresponding to
/// monotonic zero, so `origin_ms() + monotonic_now_ms()` is the wall-clock
/// equivalent of the monotonic reading.
pub trait Clock: Send + Sync {
    /// Epoch milliseconds
    fn wall_now_ms(&self) -> f64;

    /// Milliseconds since this clock's zero point
    fn monotonic_now_ms(&self) -> f64;

    /// Epoch milliseconds corresponding to monotonic zero
    fn origin_ms(&self) -> f64;

    /// Replace the origin. The only mutation point of a clock source.
    fn set_origin_ms(&self, origin_ms: f64);

    /// Read all three values at one logical instant
    fn sample(&self) -> ClockSample {
        ClockSample {
            wall_now_ms: self.wall_now_ms(),
            monotonic_now_ms: self.monotonic_now_ms(),
            origin_ms: self.origin_ms(),
        }
    }

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
