use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_MICRO: i64 = 1_000;
pub const MILLIS_PER_SECOND: i64 = 1_000;

/// Largest accepted magnitude for a caller-supplied instant, 9999-12-31T23:59:59Z
pub const MAX_INPUT_SECONDS: i64 = 253_402_300_799;

/// High resolution timestamp or duration as a `(seconds, nanos)` pair
///
/// `nanos` is always normalized into `[0, 1_000_000_000)`. A negative value
/// therefore carries its sign in `seconds`: -1.5s is `(-2, 500_000_000)`.
/// Serialized as a two element array, matching the wire shape of a split
/// timestamp.
///
/// Arithmetic saturates at the `i64` seconds range instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct HrTime {
    seconds: i64,
    nanos: i64,
}

impl HrTime {
    pub const ZERO: HrTime = HrTime {
        seconds: 0,
        nanos: 0,
    };

    /// Create a timestamp, carrying any nanosecond overflow (or borrow) into seconds
    pub fn new(seconds: i64, nanos: i64) -> Self {
        Self {
            seconds: seconds.saturating_add(nanos.div_euclid(NANOS_PER_SECOND)),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND),
        }
    }

    /// Convert epoch (or relative) milliseconds, keeping sub-millisecond precision
    ///
    /// Whole milliseconds and the fractional part are split before scaling so
    /// large epoch values do not lose nanosecond precision to `f64` rounding.
    pub fn from_millis(millis: f64) -> Self {
        if !millis.is_finite() {
            return Self::ZERO;
        }
        let whole = millis.floor();
        let fraction_nanos = ((millis - whole) * NANOS_PER_MILLI as f64).round() as i64;
        let whole = whole as i64;

        Self::new(
            whole.div_euclid(MILLIS_PER_SECOND),
            whole.rem_euclid(MILLIS_PER_SECOND) * NANOS_PER_MILLI + fraction_nanos,
        )
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> i64 {
        self.nanos
    }

    /// True when this value, read as a duration, is below zero
    pub fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    pub fn add_nanos(self, nanos: i64) -> Self {
        Self::new(self.seconds, self.nanos + nanos)
    }

    pub fn add_millis(self, millis: f64) -> Self {
        self + Self::from_millis(millis)
    }

    /// Duration from `earlier` to `self`; negative when `earlier` is later
    pub fn duration_since(self, earlier: HrTime) -> HrTime {
        self - earlier
    }

    /// Within `MAX_INPUT_SECONDS` of the epoch in either direction
    pub fn is_in_input_range(&self) -> bool {
        (-MAX_INPUT_SECONDS..=MAX_INPUT_SECONDS).contains(&self.seconds)
    }

    pub fn to_millis(&self) -> f64 {
        self.seconds as f64 * MILLIS_PER_SECOND as f64 + self.nanos as f64 / NANOS_PER_MILLI as f64
    }

    /// Microseconds, rounded to nearest; the scale used by the export surface
    pub fn to_micros(&self) -> i64 {
        self.seconds
            .saturating_mul(1_000_000)
            .saturating_add((self.nanos + NANOS_PER_MICRO / 2) / NANOS_PER_MICRO)
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos as u32)
    }

    /// ISO-8601 rendering with millisecond precision, or `None` when out of range
    pub fn to_iso8601(&self) -> Option<String> {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Add for HrTime {
    type Output = HrTime;

    fn add(self, rhs: HrTime) -> HrTime {
        HrTime::new(self.seconds.saturating_add(rhs.seconds), self.nanos + rhs.nanos)
    }
}

impl Sub for HrTime {
    type Output = HrTime;

    fn sub(self, rhs: HrTime) -> HrTime {
        HrTime::new(self.seconds.saturating_sub(rhs.seconds), self.nanos - rhs.nanos)
    }
}

impl From<(i64, i64)> for HrTime {
    fn from((seconds, nanos): (i64, i64)) -> Self {
        HrTime::new(seconds, nanos)
    }
}

impl From<HrTime> for (i64, i64) {
    fn from(time: HrTime) -> Self {
        (time.seconds, time.nanos)
    }
}

impl From<DateTime<Utc>> for HrTime {
    fn from(dt: DateTime<Utc>) -> Self {
        HrTime::new(dt.timestamp(), dt.timestamp_subsec_nanos() as i64)
    }
}

impl fmt::Display for HrTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.seconds, self.nanos)
    }
}
