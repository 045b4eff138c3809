//! Mutex-guarded limiter for sharing one gate between tasks.
//!
//! [`FailLimiter`] never locks. When several tasks must drive the same
//! progression, they share a `SharedFailLimiter` instead, which serializes
//! every decide-invoke-record sequence behind a `tokio::sync::Mutex`.

use crate::config::LimiterConfig;
use crate::gate::{FailLimiter, LimiterSnapshot};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A cloneable handle to a [`FailLimiter`] guarded by an async mutex.
///
/// All clones drive the same progression. The lock is held while the action
/// runs, so at most one action is in flight per shared limiter; concurrent
/// callers wait their turn and then see the updated skip quota.
///
/// # Examples
///
/// ```rust
/// use failgate::shared::SharedFailLimiter;
///
/// # #[tokio::main]
/// # async fn main() {
/// let limiter = SharedFailLimiter::default();
/// let worker = limiter.clone();
///
/// let first = tokio::spawn(async move { worker.attempt(|| false).await })
///     .await
///     .unwrap();
/// assert!(first);
///
/// // The clone recorded the failure, so this call is skipped.
/// assert!(!limiter.attempt(|| true).await);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SharedFailLimiter {
    inner: Arc<Mutex<FailLimiter>>,
}

impl SharedFailLimiter {
    /// Wrap an existing limiter, keeping its progression.
    pub fn new(limiter: FailLimiter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(limiter)),
        }
    }

    /// Create a shared limiter from a configuration.
    pub fn with_config(config: LimiterConfig) -> Self {
        Self::new(FailLimiter::with_config(config))
    }

    /// Run `action` through the shared gate.
    ///
    /// See [`FailLimiter::attempt`].
    pub async fn attempt<F>(&self, action: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        self.inner.lock().await.attempt(action)
    }

    /// Run an async `action` through the shared gate.
    ///
    /// The lock stays held until the action's future completes.
    pub async fn attempt_async<F, Fut>(&self, action: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        self.inner.lock().await.attempt_async(action).await
    }

    /// Clear the shared progression.
    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }

    /// Copy of the shared limiter's current state.
    pub async fn snapshot(&self) -> LimiterSnapshot {
        self.inner.lock().await.snapshot()
    }
}

impl Clone for SharedFailLimiter {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
