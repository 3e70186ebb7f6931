use thiserror::Error;

/// Errors from operator drift input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriftError {
    #[error("Drift must start with an integer number of milliseconds, got {0:?}")]
    InvalidDrift(String),

    #[error("Drift out of range: {0:?}")]
    OutOfRange(String),
}

pub type DriftResult<T> = std::result::Result<T, DriftError>;
