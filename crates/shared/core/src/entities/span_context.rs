use serde::{Deserialize, Serialize};

pub const TRACE_ID_HEX_LEN: usize = 32;
pub const SPAN_ID_HEX_LEN: usize = 16;

/// Identity of a span within a trace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanContext {
    /// 32 lowercase hex characters
    pub trace_id: String,
    /// 16 lowercase hex characters
    pub span_id: String,
    /// Whether the sampling verdict asked for export
    pub sampled: bool,
}

impl SpanContext {
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>, sampled: bool) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            sampled,
        }
    }

    /// The all-zero context handed out when tracing is suppressed
    pub fn invalid() -> Self {
        Self::new("0".repeat(TRACE_ID_HEX_LEN), "0".repeat(SPAN_ID_HEX_LEN), false)
    }

    /// Well-formed hex ids of the right length that are not all zeros
    pub fn is_valid(&self) -> bool {
        is_valid_id(&self.trace_id, TRACE_ID_HEX_LEN) && is_valid_id(&self.span_id, SPAN_ID_HEX_LEN)
    }
}

fn is_valid_id(id: &str, len: usize) -> bool {
    id.len() == len
        && id.chars().all(|c| c.is_ascii_hexdigit())
        && id.chars().any(|c| c != '0')
}

/// Role of the span in the traced operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpanKind {
    #[default]
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_context() {
        assert!(!SpanContext::invalid().is_valid());
        assert!(
            SpanContext::new("0af7651916cd43dd8448eb211c80319c", "b7ad6b7169203331", true).is_valid()
        );
        assert!(!SpanContext::new("xyz", "b7ad6b7169203331", true).is_valid());
    }
}
