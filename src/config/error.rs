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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Significance threshold must be strictly between 0 and 1")]
    InvalidSignificance,

    #[error("Plot option must be between 0 and 4")]
    InvalidPlotOption,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("AI model name must not be empty")]
    MissingModel,
}
