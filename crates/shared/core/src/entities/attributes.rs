use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value of a span or event attribute
///
/// Arrays are homogeneous by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    BoolArray(Vec<bool>),
    I64Array(Vec<i64>),
    F64Array(Vec<f64>),
    StringArray(Vec<String>),
}

/// Attribute mapping, ordered by key for stable rendering
pub type Attributes = BTreeMap<String, AttributeValue>;

impl AttributeValue {
    /// Floats must be finite to be exportable
    pub fn is_valid(&self) -> bool {
        match self {
            AttributeValue::F64(v) => v.is_finite(),
            AttributeValue::F64Array(values) => values.iter().all(|v| v.is_finite()),
            _ => true,
        }
    }
}

/// Returns a copy of `attributes` without empty keys and invalid values
///
/// Returns the dropped keys alongside so callers can report them.
pub fn sanitize_attributes(attributes: Attributes) -> (Attributes, Vec<String>) {
    let mut dropped = Vec::new();
    let sanitized = attributes
        .into_iter()
        .filter(|(key, value)| {
            let keep = !key.is_empty() && value.is_valid();
            if !keep {
                dropped.push(key.clone());
            }
            keep
        })
        .collect();
    (sanitized, dropped)
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::I64(v) => write!(f, "{v}"),
            AttributeValue::F64(v) => write!(f, "{v}"),
            AttributeValue::String(v) => write!(f, "{v}"),
            AttributeValue::BoolArray(v) => write!(f, "{v:?}"),
            AttributeValue::I64Array(v) => write!(f, "{v:?}"),
            AttributeValue::F64Array(v) => write!(f, "{v:?}"),
            AttributeValue::StringArray(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::I64(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::F64(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        AttributeValue::StringArray(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_empty_keys_and_non_finite() {
        let mut attrs = Attributes::new();
        attrs.insert("http.method".to_string(), "GET".into());
        attrs.insert(String::new(), true.into());
        attrs.insert("ratio".to_string(), f64::NAN.into());
        attrs.insert(
            "samples".to_string(),
            AttributeValue::F64Array(vec![1.0, f64::INFINITY]),
        );
        attrs.insert("retries".to_string(), 3i64.into());

        let (sanitized, dropped) = sanitize_attributes(attrs);

        assert_eq!(sanitized.len(), 2);
        assert!(sanitized.contains_key("http.method"));
        assert!(sanitized.contains_key("retries"));
        assert_eq!(dropped.len(), 3);
    }
}
