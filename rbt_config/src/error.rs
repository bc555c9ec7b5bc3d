use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or deserializing a configuration source failed
    #[error("configuration source error: {0}")]
    Source(#[from] ::config::ConfigError),
    /// Configuration validation errors
    #[error("configuration validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
