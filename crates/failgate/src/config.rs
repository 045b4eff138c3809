//! Limiter configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration of a [`FailLimiter`](crate::gate::FailLimiter).
///
/// Both fields default to `0`. Neither value is validated: out-of-range
/// values are normalized when the skip quota is computed.
///
/// - `backoff_interval`: how many failures in a row are needed before the
///   skip quota doubles again. Values `<= 0` are treated as `1`.
/// - `skip_limit`: the maximum skip quota. Values `<= 0` mean unbounded.
///
/// # Examples
///
/// ```rust
/// use failgate::config::LimiterConfig;
///
/// let config = LimiterConfig::from_toml_str("skip_limit = 8").unwrap();
/// assert_eq!(config.backoff_interval, 0);
/// assert_eq!(config.effective_backoff_interval(), 1);
/// assert_eq!(config.effective_skip_limit(), Some(8));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimiterConfig {
    /// Failures in a row before the skip quota doubles again.
    pub backoff_interval: i32,

    /// Upper bound on the skip quota, ignored unless positive.
    pub skip_limit: i32,
}

impl LimiterConfig {
    /// Create a config from its two raw values.
    pub const fn new(backoff_interval: i32, skip_limit: i32) -> Self {
        Self {
            backoff_interval,
            skip_limit,
        }
    }

    /// Parse a config from a TOML document.
    ///
    /// Missing keys fall back to `0`; unknown keys are rejected.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parse a config from a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// The backoff interval actually used, never less than 1.
    pub fn effective_backoff_interval(&self) -> u32 {
        self.backoff_interval.max(1).unsigned_abs()
    }

    /// The skip limit actually used, or `None` when the quota is unbounded.
    pub fn effective_skip_limit(&self) -> Option<u32> {
        (self.skip_limit > 0).then(|| self.skip_limit.unsigned_abs())
    }
}
