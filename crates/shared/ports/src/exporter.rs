use chronospan_core::SpanData;

/// Sink for finished spans
///
/// Receives each span exactly once, after it has ended. The record is
/// immutable from this point on.
pub trait SpanExporter: Send + Sync {
    fn export(&self, span: SpanData);

    fn name(&self) -> &str {
        "SpanExporter"
    }
}
