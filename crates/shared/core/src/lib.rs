//! Chronospan Core Domain
//!
//! Pure value types for the chronospan span timing engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    AttributeValue, Attributes, Event, ExportEvent, ExportInfo, SPAN_ID_HEX_LEN, SpanAnchor,
    SpanContext, SpanData, SpanKind, SpanLimits, SpanState, TRACE_ID_HEX_LEN, sanitize_attributes,
};
pub use values::{
    ClockSample, HrTime, MAX_INPUT_SECONDS, MILLIS_PER_SECOND, NANOS_PER_MICRO, NANOS_PER_MILLI,
    NANOS_PER_SECOND, TimeInput,
};
