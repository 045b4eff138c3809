//! Error types for limiter configuration.
//!
//! The gate itself never fails: a failing action is an input to the backoff
//! progression, not an error. Only loading a [`LimiterConfig`] from text can
//! go wrong.
//!
//! [`LimiterConfig`]: crate::config::LimiterConfig

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors that can occur while loading limiter configuration
#[derive(Debug, Error)]
pub enum GateError {
    /// TOML document could not be parsed into a config
    #[error("Invalid TOML limiter config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON document could not be parsed into a config
    #[error("Invalid JSON limiter config: {0}")]
    Json(#[from] serde_json::Error),
}
