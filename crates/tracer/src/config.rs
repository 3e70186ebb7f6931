use chronospan_core::SpanLimits;
use chronospan_ports::{ConfigResult, parse_var};
use serde::{Deserialize, Serialize};

pub const EVENT_COUNT_LIMIT_ENV: &str = "OTEL_SPAN_EVENT_COUNT_LIMIT";
pub const ATTRIBUTE_COUNT_LIMIT_ENV: &str = "OTEL_SPAN_ATTRIBUTE_COUNT_LIMIT";

/// Tracer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Bounds applied to every span of the tracer
    pub limits: SpanLimits,
}

impl TracerConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            limits: SpanLimits {
                event_count_limit: parse_var(&lookup, EVENT_COUNT_LIMIT_ENV)?,
                attribute_count_limit: parse_var(&lookup, ATTRIBUTE_COUNT_LIMIT_ENV)?,
            },
        })
    }

    pub fn with_limits(mut self, limits: SpanLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        let config = TracerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TracerConfig::default());
        assert_eq!(config.limits.event_count_limit, None);
    }

    #[test]
    fn test_limits_from_lookup() {
        let config = TracerConfig::from_lookup(|key| match key {
            EVENT_COUNT_LIMIT_ENV => Some("128".to_string()),
            ATTRIBUTE_COUNT_LIMIT_ENV => Some("0".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.limits.event_count_limit, Some(128));
        assert_eq!(config.limits.attribute_count_limit, Some(0));
    }

    #[test]
    fn test_invalid_limit_is_an_error() {
        let result = TracerConfig::from_lookup(|key| {
            (key == EVENT_COUNT_LIMIT_ENV).then(|| "-1".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json() {
        let config: TracerConfig =
            serde_json::from_str(r#"{"limits": {"event_count_limit": 2}}"#).unwrap();
        assert_eq!(config.limits.event_count_limit, Some(2));
        assert_eq!(config.limits.attribute_count_limit, None);
    }
}
