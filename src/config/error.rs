//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Failed to read schedule file: {0}")]
    ScheduleFileRead(#[from] std::io::Error),

    #[error("Failed to parse schedule file: {0}")]
    ScheduleFileParse(#[from] serde_yaml::Error),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Telephony base URL must be an http(s) URL")]
    InvalidBaseUrl,

    #[error("Telephony caller number is not a valid phone number")]
    InvalidCallerNumber,

    #[error("Telephony auth id cannot be empty")]
    EmptyAuthId,

    #[error("Check-in passphrase cannot be empty")]
    EmptyPassphrase,

    #[error("Check-in max attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("Acknowledgement word set cannot be empty")]
    EmptyAcknowledgements,

    #[error("Unknown default region '{0}'")]
    UnknownRegion(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Schedule entry for '{name}' has invalid time {hour:02}:{minute:02}")]
    InvalidScheduleTime { name: String, hour: u8, minute: u8 },
}
