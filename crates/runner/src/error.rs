//! Runner errors

use chronospan_clock::DriftError;
use chronospan_ports::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: {0:?} (try `help`)")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {value:?}")]
    InvalidArgument { command: String, value: String },

    #[error(transparent)]
    Drift(#[from] DriftError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
