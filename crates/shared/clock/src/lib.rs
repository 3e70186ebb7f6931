//! Chronospan Clock Infrastructure
//!
//! Provides clock sources and drift injection:
//!
//! ## Timelines
//!
//! ```text
//! wall clock ─────────────── subject to NTP steps and injected skew
//!
//! origin + monotonic ─────── origin rewritten by DriftSimulator,
//!                            monotonic part never moves backwards
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use chronospan_clock::{DriftConfig, DriftSimulator, SystemClock};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(SystemClock::new());
//! let mut drift = DriftSimulator::new(clock.clone(), DriftConfig::default());
//!
//! drift.set_drift(6 * 60 * 60 * 1000); // origin-adjusted time now 6h behind
//! let handle = drift.spawn_readout();  // logs both timelines every second
//! ```

mod drift;
mod error;
mod manual;
mod system;

pub use drift::{
    DRIFT_ENV, DriftConfig, DriftSimulator, READOUT_INTERVAL_ENV, Readout, SIX_HOURS_MS,
};
pub use error::{DriftError, DriftResult};
pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use chronospan_ports::Clock;
