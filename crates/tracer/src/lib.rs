//! Chronospan Tracer
//!
//! Span lifecycle and time resolution:
//!
//! - **Resolver**: turns optional caller time inputs into canonical span
//!   timestamps, correcting for wall/monotonic clock drift
//! - **Span**: Created -> Recording -> Ended state machine owning the
//!   timestamps and bounded event list
//! - **Tracer**: ids, sampling verdict, wiring to the exporter
//! - **Exporters**: in-memory collection and log dumps of finished spans
//!
//! ## Flow
//!
//! ```text
//!   Tracer::start_span(start_time?)
//!        │
//!        ▼
//!   TimeResolver::anchor ──► SpanAnchor { start, monotonic baseline, offset }
//!        │
//!        ▼
//!   Span::add_event(time?) / Span::end(time?)
//!        │   TimeResolver::resolve(anchor, time?)
//!        ▼
//!   SpanData ──► SpanExporter
//! ```

pub mod config;
pub mod exporter;
pub mod id;
pub mod resolver;
pub mod sampler;
pub mod span;
pub mod tracer;

pub use config::TracerConfig;
pub use exporter::{InMemoryExporter, LogExporter, render_summary};
pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use resolver::{DriftCorrectingResolver, PassthroughResolver};
pub use sampler::{AlwaysOff, AlwaysOn, ParentBased};
pub use span::{Span, SpanComponents, SpanOptions};
pub use tracer::{SpanHandle, Tracer};
