use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of trace and span identifiers
pub trait IdGenerator: Send + Sync {
    /// 32 lowercase hex characters, not all zero
    fn trace_id(&self) -> String;

    /// 16 lowercase hex characters, not all zero
    fn span_id(&self) -> String;
}

/// Random ids drawn from v4 UUIDs
///
/// The version nibble of a v4 UUID sits inside the first 16 hex characters,
/// so neither id can come out all zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn trace_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn span_id(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(16);
        id
    }
}

/// Counter-based ids for reproducible runs
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn trace_id(&self) -> String {
        format!("{:032x}", self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn span_id(&self) -> String {
        format!("{:016x}", self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronospan_core::SpanContext;

    #[test]
    fn test_random_ids_are_valid() {
        let generator = RandomIdGenerator;
        for _ in 0..32 {
            let context = SpanContext::new(generator.trace_id(), generator.span_id(), true);
            assert!(context.is_valid(), "{context:?}");
        }
    }

    #[test]
    fn test_sequential_ids() {
        let generator = SequentialIdGenerator::new();
        assert_eq!(generator.trace_id(), format!("{:032x}", 1));
        assert_eq!(generator.span_id(), "0000000000000002");
    }
}
