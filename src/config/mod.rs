//! Runtime configuration loaded from the environment.
use thiserror::Error;

mod network_config;
pub use network_config::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Invalid network name: {0}")]
    InvalidNetwork(String),
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
