mod anchor;
mod attributes;
mod event;
mod limits;
mod span_context;
mod span_data;

pub use anchor::{SpanAnchor, SpanState};
pub use attributes::{AttributeValue, Attributes, sanitize_attributes};
pub use event::Event;
pub use limits::SpanLimits;
pub use span_context::{SPAN_ID_HEX_LEN, SpanContext, SpanKind, TRACE_ID_HEX_LEN};
pub use span_data::{ExportEvent, ExportInfo, SpanData};
