//! Built-in samplers
//!
//! The sampling verdict is an input to the tracer, not something it computes;
//! these cover the fixed policies the harness and tests need.

use chronospan_core::{Attributes, SpanContext, SpanKind};
use chronospan_ports::{Sampler, SamplingDecision, SamplingResult};
use std::sync::Arc;

/// Records and samples every span
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOn;

impl Sampler for AlwaysOn {
    fn should_sample(
        &self,
        _parent: Option<&SpanContext>,
        _trace_id: &str,
        _name: &str,
        _kind: SpanKind,
        _attributes: &Attributes,
    ) -> SamplingResult {
        SamplingResult::new(SamplingDecision::RecordAndSample)
    }

    fn name(&self) -> &str {
        "AlwaysOn"
    }
}

/// Drops every span
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOff;

impl Sampler for AlwaysOff {
    fn should_sample(
        &self,
        _parent: Option<&SpanContext>,
        _trace_id: &str,
        _name: &str,
        _kind: SpanKind,
        _attributes: &Attributes,
    ) -> SamplingResult {
        SamplingResult::new(SamplingDecision::Drop)
    }

    fn name(&self) -> &str {
        "AlwaysOff"
    }
}

/// Follows the parent's sampled flag; root spans go to `root`
pub struct ParentBased {
    root: Arc<dyn Sampler>,
}

impl ParentBased {
    pub fn new(root: Arc<dyn Sampler>) -> Self {
        Self { root }
    }
}

impl Sampler for ParentBased {
    fn should_sample(
        &self,
        parent: Option<&SpanContext>,
        trace_id: &str,
        name: &str,
        kind: SpanKind,
        attributes: &Attributes,
    ) -> SamplingResult {
        match parent {
            Some(parent) if parent.sampled => {
                SamplingResult::new(SamplingDecision::RecordAndSample)
            }
            Some(_) => SamplingResult::new(SamplingDecision::Drop),
            None => self
                .root
                .should_sample(None, trace_id, name, kind, attributes),
        }
    }

    fn name(&self) -> &str {
        "ParentBased"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(sampler: &dyn Sampler, parent: Option<&SpanContext>) -> SamplingDecision {
        sampler
            .should_sample(parent, "trace", "span", SpanKind::Internal, &Attributes::new())
            .decision
    }

    #[test]
    fn test_fixed_samplers() {
        assert_eq!(decide(&AlwaysOn, None), SamplingDecision::RecordAndSample);
        assert_eq!(decide(&AlwaysOff, None), SamplingDecision::Drop);
    }

    #[test]
    fn test_parent_based_follows_parent() {
        let sampler = ParentBased::new(Arc::new(AlwaysOff));
        let sampled = SpanContext::new("0af7651916cd43dd8448eb211c80319c", "b7ad6b7169203331", true);
        let unsampled = SpanContext {
            sampled: false,
            ..sampled.clone()
        };

        assert_eq!(decide(&sampler, Some(&sampled)), SamplingDecision::RecordAndSample);
        assert_eq!(decide(&sampler, Some(&unsampled)), SamplingDecision::Drop);
        assert_eq!(decide(&sampler, None), SamplingDecision::Drop);
    }
}
