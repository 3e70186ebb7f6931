use serde::{Deserialize, Serialize};

use super::{Attributes, Event, SpanContext, SpanKind};
use crate::values::HrTime;

/// Immutable record of a finished span, handed to exporters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanData {
    pub context: SpanContext,
    pub parent_span_id: Option<String>,
    pub name: String,
    pub kind: SpanKind,
    pub start_time: HrTime,
    pub end_time: HrTime,
    /// Never negative
    pub duration: HrTime,
    pub attributes: Attributes,
    pub events: Vec<Event>,
    pub dropped_events_count: u32,
    pub dropped_attributes_count: u32,
}

/// Display-oriented view of a span, timestamps scaled to microseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub trace_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub id: String,
    pub kind: SpanKind,
    /// Start, epoch microseconds
    pub timestamp: i64,
    /// Microseconds
    pub duration: i64,
    pub attributes: Attributes,
    pub events: Vec<ExportEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEvent {
    pub name: String,
    /// Epoch microseconds
    pub time: i64,
}

impl SpanData {
    pub fn export_info(&self) -> ExportInfo {
        ExportInfo {
            trace_id: self.context.trace_id.clone(),
            parent_id: self.parent_span_id.clone(),
            name: self.name.clone(),
            id: self.context.span_id.clone(),
            kind: self.kind,
            timestamp: self.start_time.to_micros(),
            duration: self.duration.to_micros(),
            attributes: self.attributes.clone(),
            events: self
                .events
                .iter()
                .map(|e| ExportEvent {
                    name: e.name.clone(),
                    time: e.time.to_micros(),
                })
                .collect(),
        }
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration.to_millis()
    }
}
