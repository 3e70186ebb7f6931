//! Chronospan Runner - interactive drift-injection harness
//!
//! Stresses the span time resolution under operator-controlled skew:
//!
//! ```text
//!   stdin ──► Command ──► Harness ──┬──► DriftSimulator ──► Clock::set_origin_ms
//!                                   │
//!                                   └──► Tracer ──► Span ──► LogExporter
//!
//!   readout timer (1s) ──► wall ISO | origin + monotonic ISO
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod harness;

pub use command::{Command, HELP};
pub use config::RunnerConfig;
pub use error::{Error, Result};
pub use harness::{Harness, Outcome};
