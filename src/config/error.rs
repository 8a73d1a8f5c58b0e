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

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid log format: {0} (expected 'pretty' or 'json')")]
    InvalidLogFormat(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Database pool size must be between 1 and 50, got {0}")]
    InvalidPoolSize(u32),

    #[error("Database connect timeout must be at least one second")]
    InvalidConnectTimeout,

    #[error("Default session duration must be at least one minute")]
    InvalidSessionDuration,

    #[error("Sweep interval must be between 1 and 3600 seconds")]
    InvalidSweepInterval,

    #[error("Identity service URL must use http or https")]
    InvalidIdentityUrl,

    #[error("Identity service URL must use HTTPS in production")]
    IdentityUrlMustBeHttps,

    #[error("Identity service timeout must be between 1 and 60 seconds")]
    InvalidIdentityTimeout,
}
