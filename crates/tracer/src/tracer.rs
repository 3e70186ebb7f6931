//! Tracer - assembles spans
//!
//! Generates ids, consults the sampler and wires each new span to the
//! tracer's clock, time resolver and exporter.

use chronospan_core::{AttributeValue, Attributes, SpanContext, TimeInput};
use chronospan_ports::{Clock, Sampler, SpanExporter, TimeResolver};
use log::debug;
use std::sync::Arc;

use crate::config::TracerConfig;
use crate::id::{IdGenerator, RandomIdGenerator};
use crate::resolver::DriftCorrectingResolver;
use crate::sampler::AlwaysOn;
use crate::span::{Span, SpanComponents, SpanOptions};

/// Result of starting a span
///
/// Spans the sampler drops only carry their context; every operation on
/// them is a no-op.
#[derive(Debug)]
pub enum SpanHandle {
    Recording(Span),
    NonRecording(SpanContext),
}

impl SpanHandle {
    pub fn context(&self) -> &SpanContext {
        match self {
            SpanHandle::Recording(span) => span.context(),
            SpanHandle::NonRecording(context) => context,
        }
    }

    pub fn is_recording(&self) -> bool {
        match self {
            SpanHandle::Recording(span) => span.is_recording(),
            SpanHandle::NonRecording(_) => false,
        }
    }

    pub fn as_span(&self) -> Option<&Span> {
        match self {
            SpanHandle::Recording(span) => Some(span),
            SpanHandle::NonRecording(_) => None,
        }
    }

    pub fn add_event(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_event_with(name, None, None)
    }

    pub fn add_event_with(
        &mut self,
        name: impl Into<String>,
        attributes: Option<Attributes>,
        time: Option<TimeInput>,
    ) -> &mut Self {
        if let SpanHandle::Recording(span) = self {
            span.add_event_with(name, attributes, time);
        }
        self
    }

    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> &mut Self {
        if let SpanHandle::Recording(span) = self {
            span.set_attribute(key, value);
        }
        self
    }

    pub fn end(&mut self, time: Option<TimeInput>) {
        if let SpanHandle::Recording(span) = self {
            span.end(time);
        }
    }
}

/// Creates spans that share one clock, resolver, sampler and exporter
pub struct Tracer {
    name: String,
    components: SpanComponents,
    sampler: Arc<dyn Sampler>,
    id_generator: Arc<dyn IdGenerator>,
}

impl Tracer {
    /// Create a tracer with drift correction, an always-on sampler and random ids
    pub fn new(
        name: impl Into<String>,
        clock: Arc<dyn Clock>,
        exporter: Arc<dyn SpanExporter>,
    ) -> Self {
        Self {
            name: name.into(),
            components: SpanComponents {
                clock,
                resolver: Arc::new(DriftCorrectingResolver),
                exporter,
                limits: TracerConfig::default().limits,
            },
            sampler: Arc::new(AlwaysOn),
            id_generator: Arc::new(RandomIdGenerator),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn TimeResolver>) -> Self {
        self.components.resolver = resolver;
        self
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn with_config(mut self, config: TracerConfig) -> Self {
        self.components.limits = config.limits;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.components.clock
    }

    /// Start a span
    ///
    /// A valid parent in `options` makes the span a child in the parent's
    /// trace; otherwise a new trace id is generated.
    pub fn start_span(&self, name: impl Into<String>, mut options: SpanOptions) -> SpanHandle {
        let name = name.into();
        options.parent = options.parent.filter(SpanContext::is_valid);

        let span_id = self.id_generator.span_id();
        let trace_id = match &options.parent {
            Some(parent) => parent.trace_id.clone(),
            None => self.id_generator.trace_id(),
        };

        let sampling = self.sampler.should_sample(
            options.parent.as_ref(),
            &trace_id,
            &name,
            options.kind,
            &options.attributes,
        );

        let context = SpanContext::new(trace_id, span_id, sampling.decision.is_sampled());
        if !sampling.decision.is_recording() {
            debug!("Recording is off, propagating context in a non-recording span");
            return SpanHandle::NonRecording(context);
        }

        // sampler attributes win over caller attributes; the span sanitizes both
        options.attributes.extend(sampling.attributes);

        SpanHandle::Recording(Span::start(
            self.components.clone(),
            context,
            name,
            options,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlwaysOff, InMemoryExporter, SequentialIdGenerator};
    use chronospan_clock::ManualClock;
    use chronospan_core::SpanKind;
    use chronospan_ports::{SamplingDecision, SamplingResult};

    const ORIGIN: f64 = 1_700_000_000_000.0;

    struct TaggingSampler;

    impl Sampler for TaggingSampler {
        fn should_sample(
            &self,
            _parent: Option<&SpanContext>,
            _trace_id: &str,
            _name: &str,
            _kind: SpanKind,
            _attributes: &Attributes,
        ) -> SamplingResult {
            let mut result = SamplingResult::new(SamplingDecision::RecordAndSample);
            result
                .attributes
                .insert("sampler.rule".to_string(), "tagged".into());
            result
        }
    }

    fn tracer(exporter: Arc<InMemoryExporter>) -> Tracer {
        Tracer::new("manual", ManualClock::new(ORIGIN, 1_000.0), exporter)
            .with_id_generator(Arc::new(SequentialIdGenerator::new()))
    }

    #[test]
    fn test_root_and_child_spans_share_trace() {
        let exporter = Arc::new(InMemoryExporter::new());
        let tracer = tracer(exporter.clone());

        let mut root = tracer.start_span("root", SpanOptions::new());
        let mut child = tracer.start_span(
            "child",
            SpanOptions::new().with_parent(root.context().clone()),
        );

        assert_eq!(child.context().trace_id, root.context().trace_id);
        assert_ne!(child.context().span_id, root.context().span_id);
        assert_eq!(
            child.as_span().and_then(Span::parent_span_id),
            Some(root.context().span_id.as_str())
        );

        child.end(None);
        root.end(None);
        let names: Vec<_> = exporter
            .finished_spans()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["child", "root"]);
    }

    #[test]
    fn test_invalid_parent_starts_new_trace() {
        let exporter = Arc::new(InMemoryExporter::new());
        let tracer = tracer(exporter);

        let span = tracer.start_span(
            "orphan",
            SpanOptions::new().with_parent(SpanContext::invalid()),
        );

        assert!(span.context().is_valid());
        assert_eq!(span.as_span().and_then(Span::parent_span_id), None);
    }

    #[test]
    fn test_dropped_span_is_non_recording() {
        let exporter = Arc::new(InMemoryExporter::new());
        let tracer = tracer(exporter.clone()).with_sampler(Arc::new(AlwaysOff));

        let mut span = tracer.start_span("dropped", SpanOptions::new());
        span.add_event("ignored").set_attribute("k", "v");
        span.end(None);

        assert!(!span.is_recording());
        assert!(span.as_span().is_none());
        assert!(!span.context().sampled);
        assert!(exporter.finished_spans().is_empty());
    }

    #[test]
    fn test_sampler_attributes_merged() {
        let exporter = Arc::new(InMemoryExporter::new());
        let tracer = tracer(exporter.clone()).with_sampler(Arc::new(TaggingSampler));

        let mut span = tracer.start_span(
            "tagged",
            SpanOptions::new()
                .with_attribute("sampler.rule", "caller")
                .with_attribute("http.url", "https://httpbin.org/"),
        );
        span.end(None);

        let data = &exporter.finished_spans()[0];
        assert_eq!(data.attributes["sampler.rule"], AttributeValue::from("tagged"));
        assert_eq!(data.attributes.len(), 2);
    }

    #[test]
    fn test_invalid_start_attributes_dropped_and_counted() {
        let exporter = Arc::new(InMemoryExporter::new());
        let tracer = tracer(exporter.clone());

        let mut span = tracer.start_span(
            "sanitized",
            SpanOptions::new()
                .with_attribute("", true)
                .with_attribute("ratio", f64::NAN)
                .with_attribute("retries", 2i64),
        );
        span.end(None);

        let data = &exporter.finished_spans()[0];
        assert_eq!(data.attributes.len(), 1);
        assert_eq!(data.attributes["retries"], AttributeValue::I64(2));
        assert_eq!(data.dropped_attributes_count, 2);
    }

    #[test]
    fn test_config_limits_apply_to_spans() {
        let exporter = Arc::new(InMemoryExporter::new());
        let config = TracerConfig::default()
            .with_limits(chronospan_core::SpanLimits::unlimited().with_event_count_limit(1));
        let tracer = tracer(exporter.clone()).with_config(config);

        let mut span = tracer.start_span("bounded", SpanOptions::new());
        span.add_event("first").add_event("second");
        span.end(None);

        let data = &exporter.finished_spans()[0];
        assert_eq!(data.events.len(), 1);
        assert_eq!(data.events[0].name, "second");
        assert_eq!(data.dropped_events_count, 1);
    }
}
