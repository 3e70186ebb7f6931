use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

impl ConfigError {
    pub fn invalid(key: &str, value: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Parse an optional configuration variable from a lookup function
///
/// Config loaders take the lookup as a parameter so tests can feed values
/// without touching the process environment. Blank values count as unset.
pub fn parse_var<T, F>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::invalid(key, &raw, e)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(key: &str) -> Option<String> {
        match key {
            "LIMIT" => Some(" 64 ".to_string()),
            "BLANK" => Some("".to_string()),
            "BAD" => Some("many".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<usize, _>(&lookup, "LIMIT"), Ok(Some(64)));
        assert_eq!(parse_var::<usize, _>(&lookup, "BLANK"), Ok(None));
        assert_eq!(parse_var::<usize, _>(&lookup, "MISSING"), Ok(None));

        let err = parse_var::<usize, _>(&lookup, "BAD").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BAD"));
    }
}
