use serde::{Deserialize, Serialize};

mod hr_time;
mod time_input;

pub use hr_time::{
    HrTime, MAX_INPUT_SECONDS, MILLIS_PER_SECOND, NANOS_PER_MICRO, NANOS_PER_MILLI,
    NANOS_PER_SECOND,
};
pub use time_input::TimeInput;

/// Snapshot of a clock source taken at one logical instant
///
/// All values are milliseconds. `origin_ms` is the epoch time that
/// corresponds to monotonic zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockSample {
    pub wall_now_ms: f64,
    pub monotonic_now_ms: f64,
    pub origin_ms: f64,
}

impl ClockSample {
    /// Wall-clock equivalent of the monotonic reading: `origin + monotonic`
    pub fn monotonic_epoch_ms(&self) -> f64 {
        self.origin_ms + self.monotonic_now_ms
    }

    /// Skew between the wall clock and the origin-adjusted monotonic clock
    pub fn skew_ms(&self) -> f64 {
        self.wall_now_ms - self.monotonic_epoch_ms()
    }
}
