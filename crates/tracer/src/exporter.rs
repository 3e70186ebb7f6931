//! Span exporters
//!
//! - [`InMemoryExporter`]: collects finished spans, for tests and harnesses
//! - [`LogExporter`]: dumps each finished span through the `log` facade

use chronospan_core::{HrTime, SpanData};
use chronospan_ports::SpanExporter;
use log::{info, warn};
use parking_lot::Mutex;

/// Keeps every exported span in memory
#[derive(Debug, Default)]
pub struct InMemoryExporter {
    spans: Mutex<Vec<SpanData>>,
}

impl InMemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the spans exported so far, in export order
    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.spans.lock().clone()
    }

    pub fn reset(&self) {
        self.spans.lock().clear();
    }
}

impl SpanExporter for InMemoryExporter {
    fn export(&self, span: SpanData) {
        self.spans.lock().push(span);
    }

    fn name(&self) -> &str {
        "InMemoryExporter"
    }
}

/// Writes a one-line summary and the full JSON dump of each span
#[derive(Debug, Clone, Copy, Default)]
pub struct LogExporter;

impl LogExporter {
    pub fn new() -> Self {
        Self
    }
}

/// Human readable one-liner: name, ids, ISO start/end, duration, event offsets
pub fn render_summary(span: &SpanData) -> String {
    let iso = |t: HrTime| t.to_iso8601().unwrap_or_else(|| "Invalid Date".to_string());
    let events = span
        .events
        .iter()
        .map(|e| format!("{}@{}", e.name, iso(e.time)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} trace={} span={} start={} end={} duration={}ms events=[{}]",
        span.name,
        span.context.trace_id,
        span.context.span_id,
        iso(span.start_time),
        iso(span.end_time),
        span.duration_ms(),
        events
    )
}

impl SpanExporter for LogExporter {
    fn export(&self, span: SpanData) {
        info!("{}", render_summary(&span));
        match serde_json::to_string_pretty(&span.export_info()) {
            Ok(dump) => info!("{dump}"),
            Err(e) => warn!("Failed to serialize span {}: {}", span.name, e),
        }
    }

    fn name(&self) -> &str {
        "LogExporter"
    }
}
