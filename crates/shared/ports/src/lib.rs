//! Chronospan Ports
//!
//! Port definitions (traits) for the chronospan span timing engine.
//! These define the boundaries between the timing logic and its collaborators:
//! clock sources, timing strategies, samplers and exporters.

mod clock;
mod error;
mod exporter;
mod resolver;
mod sampler;

pub use clock::Clock;
pub use error::{ConfigError, ConfigResult, parse_var};
pub use exporter::SpanExporter;
pub use resolver::TimeResolver;
pub use sampler::{Sampler, SamplingDecision, SamplingResult};
