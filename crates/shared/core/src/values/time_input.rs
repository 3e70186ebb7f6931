use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HrTime, MAX_INPUT_SECONDS, MILLIS_PER_SECOND};

/// Caller-supplied instant for a span start, event or end
///
/// Either epoch milliseconds or an already split [`HrTime`]. Deserializes
/// from a JSON number or a `[seconds, nanos]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    Millis(f64),
    HrTime(HrTime),
}

impl TimeInput {
    /// Parse a loosely typed value; anything that is not a recognized shape is absent
    pub fn from_value(value: &serde_json::Value) -> Option<TimeInput> {
        serde_json::from_value::<TimeInput>(value.clone())
            .ok()
            .and_then(TimeInput::validated)
    }

    /// Drop inputs that cannot describe an instant
    ///
    /// NaN, infinities and anything beyond `MAX_INPUT_SECONDS` from the epoch
    /// are rejected.
    pub fn validated(self) -> Option<TimeInput> {
        let max_millis = (MAX_INPUT_SECONDS * MILLIS_PER_SECOND) as f64;
        match self {
            TimeInput::Millis(ms) if !ms.is_finite() || ms.abs() > max_millis => None,
            TimeInput::HrTime(time) if !time.is_in_input_range() => None,
            other => Some(other),
        }
    }

    pub fn to_hr_time(self) -> HrTime {
        match self {
            TimeInput::Millis(ms) => HrTime::from_millis(ms),
            TimeInput::HrTime(time) => time,
        }
    }
}

impl From<f64> for TimeInput {
    fn from(ms: f64) -> Self {
        TimeInput::Millis(ms)
    }
}

impl From<i64> for TimeInput {
    fn from(ms: i64) -> Self {
        TimeInput::Millis(ms as f64)
    }
}

impl From<HrTime> for TimeInput {
    fn from(time: HrTime) -> Self {
        TimeInput::HrTime(time)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeInput::HrTime(dt.into())
    }
}
