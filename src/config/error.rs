//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Tolerance {name} must be in (0, 1), got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("Consistency threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Advice top-k must be at least 1")]
    InvalidTopK,

    #[error("Log level directive must not be empty")]
    EmptyLogLevel,
}
