use chrono::Utc;
use chronospan_ports::Clock;
use parking_lot::RwLock;
use std::time::Instant;

/// Real system clock for production use
///
/// Wall time comes from the system calendar clock, monotonic time from an
/// [`Instant`] captured at construction. The origin starts out as the wall
/// time at construction, so both timelines agree until something moves
/// either the wall clock or the origin.
pub struct SystemClock {
    /// Monotonic zero
    started: Instant,
    /// Epoch ms corresponding to `started`
    origin_ms: RwLock<f64>,
}

impl SystemClock {
    pub fn new() -> Self {
        let started = Instant::now();
        Self {
            started,
            origin_ms: RwLock::new(epoch_ms()),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

fn epoch_ms() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000.0
}

impl Clock for SystemClock {
    fn wall_now_ms(&self) -> f64 {
        epoch_ms()
    }

    fn monotonic_now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1_000.0
    }

    fn origin_ms(&self) -> f64 {
        *self.origin_ms.read()
    }

    fn set_origin_ms(&self, origin_ms: f64) {
        *self.origin_ms.write() = origin_ms;
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let mono1 = clock.monotonic_now_ms();
        let wall1 = clock.wall_now_ms();
        thread::sleep(std::time::Duration::from_millis(10));
        let mono2 = clock.monotonic_now_ms();
        let wall2 = clock.wall_now_ms();

        assert!(mono2 > mono1);
        assert!(mono2 - mono1 >= 9.0);
        assert!(wall2 > wall1);
    }

    #[test]
    fn test_timelines_agree_without_drift() {
        let clock = SystemClock::new();
        let sample = clock.sample();

        // same process, no adjustment: skew is only the read latency
        assert!(sample.skew_ms().abs() < 50.0);
    }

    #[test]
    fn test_set_origin_leaves_monotonic_alone() {
        let clock = SystemClock::new();
        let before = clock.monotonic_now_ms();
        clock.set_origin_ms(0.0);

        assert_eq!(clock.origin_ms(), 0.0);
        assert!(clock.monotonic_now_ms() >= before);
    }
}
