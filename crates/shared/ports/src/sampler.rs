use chronospan_core::{Attributes, SpanContext, SpanKind};

/// Sampling verdict for a span about to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingDecision {
    /// Not recorded; a non-recording span carries the context only
    Drop,
    /// Recorded but not flagged for export
    RecordOnly,
    /// Recorded and flagged as sampled
    RecordAndSample,
}

impl SamplingDecision {
    pub fn is_recording(&self) -> bool {
        !matches!(self, SamplingDecision::Drop)
    }

    pub fn is_sampled(&self) -> bool {
        matches!(self, SamplingDecision::RecordAndSample)
    }
}

/// Verdict plus any attributes the sampler wants on the span
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingResult {
    pub decision: SamplingDecision,
    pub attributes: Attributes,
}

impl SamplingResult {
    pub fn new(decision: SamplingDecision) -> Self {
        Self {
            decision,
            attributes: Attributes::new(),
        }
    }
}

/// Port for the record/sample decision
pub trait Sampler: Send + Sync {
    fn should_sample(
        &self,
        parent: Option<&SpanContext>,
        trace_id: &str,
        name: &str,
        kind: SpanKind,
        attributes: &Attributes,
    ) -> SamplingResult;

    fn name(&self) -> &str {
        "Sampler"
    }
}
