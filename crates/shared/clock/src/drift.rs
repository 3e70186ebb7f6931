use chronospan_core::{ClockSample, HrTime};
use chronospan_ports::{Clock, ConfigResult, parse_var};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::{DriftError, DriftResult};

pub const DRIFT_ENV: &str = "CHRONOSPAN_DRIFT_MS";
pub const READOUT_INTERVAL_ENV: &str = "CHRONOSPAN_READOUT_INTERVAL_MS";

/// Six hours of skew, large enough to stand out in a readout
pub const SIX_HOURS_MS: i64 = 6 * 60 * 60 * 1000;

/// Configuration for drift injection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Drift applied when the simulator is constructed
    pub initial_drift_ms: i64,
    /// Period of the readout task
    pub readout_interval_ms: u64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            initial_drift_ms: 0,
            readout_interval_ms: 1_000,
        }
    }
}

impl DriftConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(drift) = parse_var::<i64, _>(&lookup, DRIFT_ENV)? {
            config.initial_drift_ms = drift;
        }
        if let Some(interval) = parse_var::<u64, _>(&lookup, READOUT_INTERVAL_ENV)? {
            if interval == 0 {
                return Err(chronospan_ports::ConfigError::invalid(
                    READOUT_INTERVAL_ENV,
                    "0",
                    "interval must be positive",
                ));
            }
            config.readout_interval_ms = interval;
        }
        Ok(config)
    }

    pub fn with_initial_drift_ms(mut self, drift_ms: i64) -> Self {
        self.initial_drift_ms = drift_ms;
        self
    }

    pub fn with_readout_interval(mut self, interval: Duration) -> Self {
        self.readout_interval_ms = (interval.as_millis() as u64).max(1);
        self
    }

    pub fn readout_interval(&self) -> Duration {
        Duration::from_millis(self.readout_interval_ms.max(1))
    }
}

/// The two timelines rendered side by side
///
/// With zero drift both strings agree; a non-zero drift shows up as the
/// monotonic-derived timestamp running behind or ahead of the wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    /// ISO-8601 of the wall clock
    pub wall_iso: String,
    /// ISO-8601 of `origin + monotonic`
    pub monotonic_iso: String,
    /// `wall - (origin + monotonic)` in ms
    pub divergence_ms: f64,
}

impl Readout {
    pub fn from_sample(sample: &ClockSample) -> Self {
        Self {
            wall_iso: render_iso(sample.wall_now_ms),
            monotonic_iso: render_iso(sample.monotonic_epoch_ms()),
            divergence_ms: sample.skew_ms(),
        }
    }
}

fn render_iso(epoch_ms: f64) -> String {
    HrTime::from_millis(epoch_ms)
        .to_iso8601()
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// Operator-controlled wall-clock skew
///
/// Rewrites the clock's origin as `basis - drift`, where the basis is the
/// origin the clock had when the simulator was built. Monotonic time is never
/// touched, so spans timed on the monotonic clock must be unaffected by
/// whatever drift is applied here.
pub struct DriftSimulator {
    clock: Arc<dyn Clock>,
    basis_ms: f64,
    drift_ms: i64,
    config: DriftConfig,
    readout_tx: broadcast::Sender<Readout>,
}

impl DriftSimulator {
    /// Capture the clock's current origin as the basis and apply the initial drift
    pub fn new(clock: Arc<dyn Clock>, config: DriftConfig) -> Self {
        let (readout_tx, _) = broadcast::channel(64);
        let basis_ms = clock.origin_ms();
        let initial_drift_ms = config.initial_drift_ms;
        let mut simulator = Self {
            clock,
            basis_ms,
            drift_ms: 0,
            config,
            readout_tx,
        };
        simulator.set_drift(initial_drift_ms);
        simulator
    }

    pub fn drift_ms(&self) -> i64 {
        self.drift_ms
    }

    pub fn basis_ms(&self) -> f64 {
        self.basis_ms
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Apply a drift: `origin = basis - drift`
    pub fn set_drift(&mut self, drift_ms: i64) {
        self.drift_ms = drift_ms;
        let origin = self.basis_ms - drift_ms as f64;
        self.clock.set_origin_ms(origin);
        info!(
            "Drift set to {}ms on {} (origin {})",
            drift_ms,
            self.clock.name(),
            render_iso(origin)
        );
    }

    /// Apply a drift typed by an operator
    ///
    /// Accepts a leading integer and ignores trailing text (`"250ms"` is 250).
    /// Input without a leading integer is rejected and the drift is unchanged.
    pub fn set_drift_str(&mut self, raw: &str) -> DriftResult<i64> {
        let drift = parse_leading_int(raw)?;
        self.set_drift(drift);
        Ok(drift)
    }

    /// Render both timelines now
    pub fn readout(&self) -> Readout {
        Readout::from_sample(&self.clock.sample())
    }

    /// Subscribe to periodic readouts
    pub fn subscribe(&self) -> broadcast::Receiver<Readout> {
        self.readout_tx.subscribe()
    }

    /// Start publishing a readout every `readout_interval`
    ///
    /// Runs until the returned handle is aborted or the runtime shuts down.
    pub fn spawn_readout(&self) -> JoinHandle<()> {
        let clock = Arc::clone(&self.clock);
        let readout_tx = self.readout_tx.clone();
        let period = self.config.readout_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let readout = Readout::from_sample(&clock.sample());
                debug!(
                    "wall {} | monotonic {} | divergence {}ms",
                    readout.wall_iso, readout.monotonic_iso, readout.divergence_ms
                );
                // No subscribers is ok
                let _ = readout_tx.send(readout);
            }
        })
    }
}

fn parse_leading_int(raw: &str) -> DriftResult<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(|c: char| c == '-' || c == '+'));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(DriftError::InvalidDrift(raw.to_string()));
    }
    trimmed[..sign_len + digits_len]
        .parse::<i64>()
        .map_err(|_| DriftError::OutOfRange(raw.to_string()))
}
