use serde::{Deserialize, Serialize};

use super::Attributes;
use crate::values::HrTime;

/// Named, timestamped occurrence within a span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub attributes: Attributes,
    pub time: HrTime,
}

impl Event {
    pub fn new(name: impl Into<String>, attributes: Attributes, time: HrTime) -> Self {
        Self {
            name: name.into(),
            attributes,
            time,
        }
    }
}
