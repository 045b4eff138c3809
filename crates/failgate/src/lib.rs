#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Exponential-backoff call gates.
//!
//! `failgate` decides, each time a caller wants to run a possibly failing
//! action, whether to run it now or skip this attempt. It never sleeps and
//! never schedules timers: the caller's own loop decides when to ask again.
//!
//! - **Skip quotas** via [`FailLimiter`](gate::FailLimiter)
//!   - Quota doubles every `backoff_interval` failures in a row
//!   - Optional cap via `skip_limit`
//!   - Any success resets the progression
//! - **A common gate trait** via [`CallGate`](gate::CallGate)
//! - **Serde-backed configuration** via [`LimiterConfig`](config::LimiterConfig)
//! - **Opt-in sharing** via [`SharedFailLimiter`](shared::SharedFailLimiter)
//!
//! With the `tracing` feature (on by default) skips, failures and recoveries
//! are reported as `tracing` events.
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use failgate::prelude::*;
//!
//! let mut limiter = FailLimiter::builder().skip_limit(2).build();
//!
//! let mut last_error = None;
//! let tried = limiter.attempt(|| match std::fs::metadata("/definitely/missing") {
//!     Ok(_) => true,
//!     Err(err) => {
//!         last_error = Some(err);
//!         false
//!     }
//! });
//!
//! assert!(tried);
//! assert!(last_error.is_some());
//! assert_eq!(limiter.state(), GateState::Backoff);
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod shared;

pub use error::{GateError, Result};

/// Convenient re-exports of commonly used items.
///
/// Import all gate types with:
///
/// ```rust
/// use failgate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::LimiterConfig;
    pub use crate::error::GateError;
    pub use crate::gate::{Attempt, BackoffGate, CallGate, FailLimiter, GateState};
    pub use crate::shared::SharedFailLimiter;
}
