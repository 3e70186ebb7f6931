//! Span lifecycle
//!
//! A span is created, anchored by its time resolver and immediately starts
//! recording. It accepts events and attributes until `end` is called once,
//! at which point an immutable [`SpanData`] is handed to the exporter.

use chronospan_core::{
    AttributeValue, Attributes, Event, HrTime, SpanAnchor, SpanContext, SpanData, SpanKind,
    SpanLimits, SpanState, TimeInput, sanitize_attributes,
};
use chronospan_ports::{Clock, SpanExporter, TimeResolver};
use log::{debug, error, warn};
use std::collections::VecDeque;
use std::sync::Arc;

/// Collaborators every span of a tracer shares
#[derive(Clone)]
pub struct SpanComponents {
    pub clock: Arc<dyn Clock>,
    pub resolver: Arc<dyn TimeResolver>,
    pub exporter: Arc<dyn SpanExporter>,
    pub limits: SpanLimits,
}

/// Caller options for a new span
#[derive(Debug, Clone, Default)]
pub struct SpanOptions {
    /// Explicit start; absent means "now"
    pub start_time: Option<TimeInput>,
    pub kind: SpanKind,
    pub attributes: Attributes,
    /// Parent context; a valid parent makes this a child span of the same trace
    pub parent: Option<SpanContext>,
}

impl SpanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_time(mut self, start_time: impl Into<TimeInput>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn with_kind(mut self, kind: SpanKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_parent(mut self, parent: SpanContext) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// A single traced operation
pub struct Span {
    context: SpanContext,
    parent_span_id: Option<String>,
    name: String,
    kind: SpanKind,
    attributes: Attributes,
    anchor: SpanAnchor,
    end_time: Option<HrTime>,
    duration: HrTime,
    events: VecDeque<Event>,
    dropped_events_count: u32,
    dropped_attributes_count: u32,
    state: SpanState,
    components: SpanComponents,
}

impl Span {
    /// Create a span and move it straight into `Recording`
    pub fn start(
        components: SpanComponents,
        context: SpanContext,
        name: impl Into<String>,
        options: SpanOptions,
    ) -> Self {
        let name = name.into();
        let anchor = components
            .resolver
            .anchor(components.clock.as_ref(), options.start_time);

        let mut span = Self {
            context,
            parent_span_id: options.parent.map(|p| p.span_id),
            name,
            kind: options.kind,
            attributes: Attributes::new(),
            anchor,
            end_time: None,
            duration: HrTime::ZERO,
            events: VecDeque::new(),
            dropped_events_count: 0,
            dropped_attributes_count: 0,
            state: SpanState::Created,
            components,
        };
        span.state = SpanState::Recording;
        span.set_attributes(options.attributes);

        debug!(
            "{} input startTime {:?} span startTime {} ({}ms)",
            span.context.span_id,
            options.start_time,
            span.anchor.start,
            span.anchor.start.to_millis()
        );
        span
    }

    pub fn context(&self) -> &SpanContext {
        &self.context
    }

    pub fn parent_span_id(&self) -> Option<&str> {
        self.parent_span_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn state(&self) -> SpanState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == SpanState::Recording
    }

    pub fn anchor(&self) -> &SpanAnchor {
        &self.anchor
    }

    pub fn start_time(&self) -> HrTime {
        self.anchor.start
    }

    pub fn end_time(&self) -> Option<HrTime> {
        self.end_time
    }

    /// Zero until the span has ended, never negative afterwards
    pub fn duration(&self) -> HrTime {
        self.duration
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn events(&self) -> impl ExactSizeIterator<Item = &Event> {
        self.events.iter()
    }

    pub fn dropped_events_count(&self) -> u32 {
        self.dropped_events_count
    }

    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> &mut Self {
        let mut attributes = Attributes::new();
        attributes.insert(key.into(), value.into());
        self.set_attributes(attributes)
    }

    pub fn set_attributes(&mut self, attributes: Attributes) -> &mut Self {
        if !self.check_recording("set_attributes") {
            return self;
        }
        let (attributes, dropped) = sanitize_attributes(attributes);
        if !dropped.is_empty() {
            warn!("Dropping invalid attributes {:?} on span {}", dropped, self.name);
            self.dropped_attributes_count += dropped.len() as u32;
        }

        for (key, value) in attributes {
            let at_limit = self
                .components
                .limits
                .attribute_count_limit
                .is_some_and(|limit| self.attributes.len() >= limit);
            if at_limit && !self.attributes.contains_key(&key) {
                self.dropped_attributes_count += 1;
                continue;
            }
            self.attributes.insert(key, value);
        }
        self
    }

    /// Record an event at the current instant
    pub fn add_event(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_event_with(name, None, None)
    }

    /// Record an event with optional attributes and an optional explicit time
    pub fn add_event_with(
        &mut self,
        name: impl Into<String>,
        attributes: Option<Attributes>,
        time: Option<TimeInput>,
    ) -> &mut Self {
        if !self.check_recording("add_event") {
            return self;
        }

        match self.components.limits.event_count_limit {
            Some(0) => {
                warn!("No events allowed.");
                self.dropped_events_count += 1;
                return self;
            }
            Some(limit) => {
                while self.events.len() >= limit {
                    warn!("Dropping extra events.");
                    self.events.pop_front();
                    self.dropped_events_count += 1;
                }
            }
            None => {}
        }

        let (attributes, dropped) = sanitize_attributes(attributes.unwrap_or_default());
        if !dropped.is_empty() {
            warn!("Dropping invalid event attributes {dropped:?}");
        }
        let time = self
            .components
            .resolver
            .resolve(self.components.clock.as_ref(), &self.anchor, time);

        self.events.push_back(Event::new(name, attributes, time));
        self
    }

    /// End the span; only the first call has any effect
    ///
    /// An end that resolves before the start is clamped to the start, giving
    /// a zero duration.
    pub fn end(&mut self, time: Option<TimeInput>) {
        if self.state.is_terminal() {
            error!(
                "You can only call end() on a span once. (span {} {})",
                self.name, self.context.span_id
            );
            return;
        }

        let mut end_time = self
            .components
            .resolver
            .resolve(self.components.clock.as_ref(), &self.anchor, time);
        let mut duration = end_time.duration_since(self.anchor.start);

        debug!(
            "{} input endTime {:?} span endTime {} ({}ms) duration {} ({}ms)",
            self.context.span_id,
            time,
            end_time,
            end_time.to_millis(),
            duration,
            duration.to_millis()
        );

        if duration.is_negative() {
            warn!(
                "Inconsistent start and end time, startTime > endTime. Setting span duration to 0ms. start={} end={}",
                self.anchor.start, end_time
            );
            end_time = self.anchor.start;
            duration = HrTime::ZERO;
        }

        self.end_time = Some(end_time);
        self.duration = duration;
        self.state = SpanState::Ended;

        if let Some(data) = self.finished() {
            if self.context.sampled {
                self.components.exporter.export(data);
            } else {
                debug!("Span {} recorded but not sampled, skipping export", self.name);
            }
        }
    }

    /// Immutable snapshot, available once the span has ended
    pub fn finished(&self) -> Option<SpanData> {
        let end_time = self.end_time?;
        Some(SpanData {
            context: self.context.clone(),
            parent_span_id: self.parent_span_id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            start_time: self.anchor.start,
            end_time,
            duration: self.duration,
            attributes: self.attributes.clone(),
            events: self.events.iter().cloned().collect(),
            dropped_events_count: self.dropped_events_count,
            dropped_attributes_count: self.dropped_attributes_count,
        })
    }

    fn check_recording(&self, operation: &str) -> bool {
        if self.is_recording() {
            return true;
        }
        warn!(
            "Can not execute the operation {operation} on ended span {} {}",
            self.name, self.context.span_id
        );
        false
    }
}

impl std::fmt::Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("context", &self.context)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("start", &self.anchor.start)
            .field("end", &self.end_time)
            .field("duration", &self.duration)
            .field("events", &self.events.len())
            .finish()
    }
}
