use serde::{Deserialize, Serialize};

/// Per-span container bounds
///
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpanLimits {
    /// Maximum retained events; the oldest is evicted when exceeded
    pub event_count_limit: Option<usize>,
    /// Maximum attributes; new keys beyond the bound are dropped
    pub attribute_count_limit: Option<usize>,
}

impl SpanLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_event_count_limit(mut self, limit: usize) -> Self {
        self.event_count_limit = Some(limit);
        self
    }

    pub fn with_attribute_count_limit(mut self, limit: usize) -> Self {
        self.attribute_count_limit = Some(limit);
        self
    }
}
