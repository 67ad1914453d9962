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

/// Semantic problems in otherwise well-formed configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("{0} must not be negative")]
    NegativeValue(&'static str),

    #[error("{0} must not exceed {1}")]
    ValueTooLarge(&'static str, i64),

    #[error("min_duration_minutes must be below max_duration_hours")]
    InvalidDurationBounds,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
