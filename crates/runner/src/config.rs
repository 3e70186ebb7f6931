//! Runner configuration
//!
//! Loaded from a JSON file or from environment variables; missing sections
//! fall back to their defaults.

use chronospan_clock::DriftConfig;
use chronospan_ports::ConfigError;
use chronospan_tracer::TracerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub drift: DriftConfig,
    pub tracer: TracerConfig,
    /// Duration of `span` commands given without an argument
    pub default_span_ms: Option<u64>,
}

impl RunnerConfig {
    pub const DEFAULT_SPAN_MS: u64 = 500;

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read every section from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            drift: DriftConfig::from_env()?,
            tracer: TracerConfig::from_env()?,
            default_span_ms: None,
        })
    }

    pub fn default_span_ms(&self) -> u64 {
        self.default_span_ms.unwrap_or(Self::DEFAULT_SPAN_MS)
    }
}
