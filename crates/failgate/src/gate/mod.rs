//! Call gates with exponential backoff on failure.
//!
//! A gate sits between a caller's polling loop and a possibly failing
//! action. Each time the caller wants to run the action it asks the gate,
//! which either invokes the action or skips this call. Repeated failures make
//! invocations increasingly rare; a success restores normal operation.
//!
//! # Key Types
//!
//! - [`CallGate`] - Core trait for invoke-or-skip gates
//! - [`FailLimiter`] - Exponential skip quota, also exported as [`BackoffGate`]
//! - [`Attempt`] - Outcome of running a `Result`-returning action through a gate
//!
//! # Examples
//!
//! ```rust
//! use failgate::gate::FailLimiter;
//!
//! let mut limiter = FailLimiter::builder().skip_limit(2).build();
//!
//! for tick in 1..=12 {
//!     let mut error = None;
//!     let tried = limiter.attempt(|| {
//!         let outcome: Result<(), String> = Err(format!("tick {tick} failed"));
//!         error = outcome.err();
//!         error.is_none()
//!     });
//!     if tried {
//!         assert!(error.is_some());
//!     }
//! }
//! ```

mod limiter;
mod strategy;

pub use limiter::{
    BackoffGate, FailLimiter, FailLimiterBuilder, GateState, LimiterSnapshot, skip_quota,
};
pub use strategy::{Attempt, CallGate};
