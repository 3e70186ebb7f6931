//! Harness - wires clock, drift simulator and tracer together
//!
//! Each operator command maps to one action:
//! - drift changes rewrite the clock origin
//! - `span` runs a clock-derived span across real time
//! - `week` runs a back-dated span with explicit start and end

use chronospan_clock::{Clock, DriftSimulator};
use chronospan_ports::SpanExporter;
use chronospan_tracer::{SpanHandle, SpanOptions, Tracer};
use log::info;
use std::sync::Arc;
use std::time::Duration;

use crate::command::{Command, HELP};
use crate::config::RunnerConfig;
use crate::error::Result;

const DAY_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct Harness {
    drift: DriftSimulator,
    tracer: Tracer,
    manual: Tracer,
    default_span: Duration,
}

impl Harness {
    pub fn new(
        clock: Arc<dyn Clock>,
        exporter: Arc<dyn SpanExporter>,
        config: &RunnerConfig,
    ) -> Self {
        let drift = DriftSimulator::new(Arc::clone(&clock), config.drift.clone());
        let tracer = Tracer::new("harness", Arc::clone(&clock), Arc::clone(&exporter))
            .with_config(config.tracer.clone());
        let manual = Tracer::new("manual", clock, exporter).with_config(config.tracer.clone());

        Self {
            drift,
            tracer,
            manual,
            default_span: Duration::from_millis(config.default_span_ms()),
        }
    }

    pub fn drift(&self) -> &DriftSimulator {
        &self.drift
    }

    pub async fn handle(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::SetDrift(raw) => {
                self.drift.set_drift_str(&raw)?;
            }
            Command::Span(ms) => {
                let duration = ms.map(Duration::from_millis).unwrap_or(self.default_span);
                self.run_clock_span(duration).await;
            }
            Command::WeekAgo => {
                self.run_week_ago_span();
            }
            Command::Readout => {
                let readout = self.drift.readout();
                info!(
                    "Date.now {} | origin + monotonic {} | drift {}ms",
                    readout.wall_iso,
                    readout.monotonic_iso,
                    self.drift.drift_ms()
                );
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }

    /// Run a span timed entirely by the clock, with an event at its midpoint
    ///
    /// Drift applied while this is awaiting must not change the reported
    /// duration.
    pub async fn run_clock_span(&self, duration: Duration) -> SpanHandle {
        let mut span = self.tracer.start_span(
            "Timed Span",
            SpanOptions::new().with_attribute("requested.duration_ms", duration.as_millis() as i64),
        );

        let half = duration / 2;
        tokio::time::sleep(half).await;
        span.add_event("midpoint");
        tokio::time::sleep(duration - half).await;
        span.end(None);
        span
    }

    /// Run a span started seven days ago and ended six days ago
    pub fn run_week_ago_span(&self) -> SpanHandle {
        let now = self.manual.clock().wall_now_ms();
        let mut span = self.manual.start_span(
            "Manual Span",
            SpanOptions::new().with_start_time(now - 7.0 * DAY_MS),
        );
        span.end(Some((now - 6.0 * DAY_MS).into()));
        span
    }
}
