//! Exponential fail limiter.

use super::strategy::CallGate;
use crate::config::LimiterConfig;
use serde::Serialize;
use std::future::Future;

/// Gate that makes calls to a failing action increasingly rare.
///
/// Every failure sets a skip quota: that many following calls return without
/// invoking the action. The quota doubles after every `backoff_interval`
/// failures in a row and is capped by `skip_limit` when one is configured.
/// Any success, or an explicit [`reset`](FailLimiter::reset), clears the
/// progression.
///
/// # Skip Quota Formula
///
/// When the action fails while `fails_in_a_row` failures are already on
/// record:
/// ```text
/// interval = max(backoff_interval, 1)
/// quota    = 2 ^ (fails_in_a_row / interval)      (integer division)
/// quota    = min(quota, skip_limit)                if skip_limit > 0
/// ```
///
/// With an unbounded limit the quota saturates at `u32::MAX` instead of
/// overflowing.
///
/// # Examples
///
/// ```rust
/// use failgate::gate::FailLimiter;
///
/// let mut limiter = FailLimiter::new();
/// let pattern: Vec<bool> = (0..12).map(|_| limiter.attempt(|| false)).collect();
///
/// // Invoked on calls 1, 3, 6 and 11.
/// let invoked: Vec<usize> = pattern
///     .iter()
///     .enumerate()
///     .filter(|(_, tried)| **tried)
///     .map(|(i, _)| i + 1)
///     .collect();
/// assert_eq!(invoked, vec![1, 3, 6, 11]);
/// ```
///
/// # Concurrency
///
/// `FailLimiter` holds no lock. Mutating it needs `&mut self`, so one owner
/// drives it at a time. To share a limiter between tasks, wrap it externally,
/// for example in [`SharedFailLimiter`](crate::shared::SharedFailLimiter).
#[derive(Debug, Clone, Default)]
pub struct FailLimiter {
    config: LimiterConfig,
    skip: u32,
    fails_in_a_row: u32,
}

/// The second public name of [`FailLimiter`].
pub type BackoffGate = FailLimiter;

/// Whether the next call of a limiter will invoke its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// The skip quota is spent; the next call invokes the action.
    Active,

    /// The next call is skipped.
    Backoff,
}

/// Point-in-time copy of a limiter's configuration and progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimiterSnapshot {
    /// Configuration the limiter was built with.
    pub config: LimiterConfig,
    /// Active or backing off.
    pub state: GateState,
    /// Remaining calls to skip.
    pub skip: u32,
    /// Failures observed since the last success or reset.
    pub fails_in_a_row: u32,
}

/// Compute the skip quota recorded when an action fails after
/// `fails_in_a_row` earlier consecutive failures.
///
/// ```rust
/// use failgate::config::LimiterConfig;
/// use failgate::gate::skip_quota;
///
/// let config = LimiterConfig::new(2, 0);
/// let quotas: Vec<u32> = (0..6).map(|n| skip_quota(n, &config)).collect();
/// assert_eq!(quotas, vec![1, 1, 2, 2, 4, 4]);
/// ```
pub fn skip_quota(fails_in_a_row: u32, config: &LimiterConfig) -> u32 {
    let exponent = fails_in_a_row / config.effective_backoff_interval();
    let quota = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);

    match config.effective_skip_limit() {
        Some(limit) => quota.min(limit),
        None => quota,
    }
}

impl FailLimiter {
    /// Create a limiter with the default configuration: the quota doubles
    /// after every failure and has no upper bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a limiter from a loaded configuration.
    pub fn with_config(config: LimiterConfig) -> Self {
        Self {
            config,
            skip: 0,
            fails_in_a_row: 0,
        }
    }

    /// Create a new builder for configuring a limiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use failgate::gate::FailLimiter;
    ///
    /// let limiter = FailLimiter::builder()
    ///     .backoff_interval(2)
    ///     .skip_limit(16)
    ///     .build();
    /// assert_eq!(limiter.config().skip_limit, 16);
    /// ```
    pub fn builder() -> FailLimiterBuilder {
        FailLimiterBuilder::default()
    }

    /// Invoke `action` unless a skip is pending.
    ///
    /// Returns `true` if `action` was invoked, whether or not it succeeded,
    /// and `false` if the call was skipped. A successful action resets the
    /// progression; a failing one records a new skip quota.
    pub fn attempt<F>(&mut self, action: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if self.consume_skip() {
            return false;
        }
        let succeeded = action();
        self.record(succeeded);
        true
    }

    /// Async counterpart of [`attempt`](FailLimiter::attempt).
    ///
    /// The future returned by `action` is only created and awaited when no
    /// skip is pending. A skipped call completes without yielding.
    ///
    /// ```rust
    /// use failgate::gate::FailLimiter;
    ///
    /// # async fn example() {
    /// let mut limiter = FailLimiter::new();
    /// let tried = limiter.attempt_async(|| async { false }).await;
    /// assert!(tried);
    /// assert!(!limiter.attempt_async(|| async { true }).await);
    /// # }
    /// ```
    pub async fn attempt_async<F, Fut>(&mut self, action: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        if self.consume_skip() {
            return false;
        }
        let succeeded = action().await;
        self.record(succeeded);
        true
    }

    /// Clear the progression so the next call invokes its action.
    ///
    /// Idempotent. The configuration is kept.
    pub fn reset(&mut self) {
        #[cfg(feature = "tracing")]
        {
            if self.fails_in_a_row > 0 || self.skip > 0 {
                tracing::trace!(
                    skip = self.skip,
                    fails_in_a_row = self.fails_in_a_row,
                    "Resetting fail limiter"
                );
            }
        }

        self.skip = 0;
        self.fails_in_a_row = 0;
    }

    /// Remaining calls that will be skipped.
    pub fn skip(&self) -> u32 {
        self.skip
    }

    /// Failures observed since the last success or reset.
    pub fn fails_in_a_row(&self) -> u32 {
        self.fails_in_a_row
    }

    /// The configuration this limiter was built with.
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Whether the next call will be skipped.
    pub fn is_backing_off(&self) -> bool {
        self.skip > 0
    }

    /// Current state of the gate.
    pub fn state(&self) -> GateState {
        if self.is_backing_off() {
            GateState::Backoff
        } else {
            GateState::Active
        }
    }

    /// Copy of the current configuration and progression.
    pub fn snapshot(&self) -> LimiterSnapshot {
        LimiterSnapshot {
            config: self.config,
            state: self.state(),
            skip: self.skip,
            fails_in_a_row: self.fails_in_a_row,
        }
    }

    /// Spend one pending skip. Returns `true` if this call must be skipped.
    fn consume_skip(&mut self) -> bool {
        if self.skip == 0 {
            return false;
        }
        self.skip -= 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(remaining = self.skip, "Skipping action");

        true
    }

    fn record(&mut self, succeeded: bool) {
        if succeeded {
            #[cfg(feature = "tracing")]
            {
                if self.fails_in_a_row > 0 {
                    tracing::debug!(fails_in_a_row = self.fails_in_a_row, "Action recovered");
                }
            }

            self.reset();
            return;
        }

        self.skip = skip_quota(self.fails_in_a_row, &self.config);
        self.fails_in_a_row = self.fails_in_a_row.saturating_add(1);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            fails_in_a_row = self.fails_in_a_row,
            skip = self.skip,
            "Action failed, backing off"
        );
    }
}

impl CallGate for FailLimiter {
    fn attempt<F>(&mut self, action: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        FailLimiter::attempt(self, action)
    }

    fn reset(&mut self) {
        FailLimiter::reset(self)
    }
}

/// Builder for configuring a `FailLimiter`.
///
/// # Examples
///
/// ```rust
/// use failgate::gate::FailLimiter;
///
/// let limiter = FailLimiter::builder().skip_limit(2).build();
/// assert_eq!(limiter.config().effective_skip_limit(), Some(2));
/// ```
#[derive(Debug, Default)]
pub struct FailLimiterBuilder {
    backoff_interval: Option<i32>,
    skip_limit: Option<i32>,
}

impl FailLimiterBuilder {
    /// Set how many failures in a row double the skip quota.
    ///
    /// Default: 0 (treated as 1)
    pub fn backoff_interval(mut self, backoff_interval: i32) -> Self {
        self.backoff_interval = Some(backoff_interval);
        self
    }

    /// Set the maximum skip quota.
    ///
    /// Default: 0 (unbounded)
    pub fn skip_limit(mut self, skip_limit: i32) -> Self {
        self.skip_limit = Some(skip_limit);
        self
    }

    /// Build the `FailLimiter` instance.
    pub fn build(self) -> FailLimiter {
        FailLimiter::with_config(LimiterConfig {
            backoff_interval: self.backoff_interval.unwrap_or(0),
            skip_limit: self.skip_limit.unwrap_or(0),
        })
    }
}
