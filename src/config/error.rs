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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("API base URL must be an http(s) URL")]
    InvalidBaseUrl,

    #[error("Assessments path must start with '/'")]
    InvalidAssessmentsPath,

    #[error("Invalid request timeout (1..=300 seconds)")]
    InvalidTimeout,

    #[error("Progress tick interval must be positive")]
    InvalidTickInterval,

    #[error("Progress step must be within 1..=50 percent")]
    InvalidProgressStep,

    #[error("Log filter must not be empty")]
    EmptyLogFilter,
}
