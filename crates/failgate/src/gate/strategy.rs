//! The call gate abstraction shared by every limiter.

/// A gate that decides, on each call, whether a guarded action runs now or
/// is skipped.
///
/// Implementations observe whether the action succeeded and use that history
/// to throttle future invocations. A gate never sleeps or schedules anything:
/// the caller drives it from its own loop (a retry loop, a heartbeat, an event
/// handler) and the gate only answers "invoke now?" each time.
///
/// # Examples
///
/// ```rust
/// use failgate::gate::{CallGate, FailLimiter};
///
/// fn poll<G: CallGate>(gate: &mut G, healthy: bool) -> bool {
///     gate.attempt(|| healthy)
/// }
///
/// let mut gate = FailLimiter::new();
/// assert!(poll(&mut gate, false)); // invoked, failed
/// assert!(!poll(&mut gate, false)); // skipped
/// assert!(poll(&mut gate, true)); // invoked, succeeded
/// ```
pub trait CallGate {
    /// Invoke `action` unless the gate currently asks for a skip.
    ///
    /// `action` reports success by returning `true`. The return value of
    /// `attempt` tells whether `action` was invoked during this call, not
    /// whether it succeeded. Callers that need the outcome capture it from
    /// inside the closure:
    ///
    /// ```rust
    /// use failgate::gate::{CallGate, FailLimiter};
    ///
    /// let mut gate = FailLimiter::new();
    /// let mut err = None;
    /// let tried = gate.attempt(|| match "x".parse::<u8>() {
    ///     Ok(_) => true,
    ///     Err(e) => {
    ///         err = Some(e);
    ///         false
    ///     }
    /// });
    ///
    /// assert!(tried);
    /// assert!(err.is_some());
    /// ```
    fn attempt<F>(&mut self, action: F) -> bool
    where
        F: FnOnce() -> bool;

    /// Forget all failure history so the next `attempt` invokes its action.
    fn reset(&mut self);

    /// Like [`attempt`](CallGate::attempt), for actions returning a `Result`.
    ///
    /// `Ok` counts as success and `Err` as failure. The value is carried out
    /// of the closure and handed back in an [`Attempt`].
    ///
    /// ```rust
    /// use failgate::gate::{Attempt, CallGate, FailLimiter};
    ///
    /// let mut gate = FailLimiter::new();
    /// let first = gate.attempt_result(|| "x".parse::<u8>());
    /// assert!(matches!(first, Attempt::Failed(_)));
    ///
    /// let second = gate.attempt_result(|| "7".parse::<u8>());
    /// assert!(second.is_skipped());
    ///
    /// let third = gate.attempt_result(|| "7".parse::<u8>());
    /// assert_eq!(third.into_result().unwrap().unwrap(), 7);
    /// ```
    fn attempt_result<T, E, F>(&mut self, action: F) -> Attempt<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut outcome = None;
        self.attempt(|| {
            let result = action();
            let succeeded = result.is_ok();
            outcome = Some(result);
            succeeded
        });

        match outcome {
            None => Attempt::Skipped,
            Some(Ok(value)) => Attempt::Succeeded(value),
            Some(Err(err)) => Attempt::Failed(err),
        }
    }
}

/// Outcome of [`CallGate::attempt_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T, E> {
    /// The gate was backing off; the action did not run.
    Skipped,

    /// The action ran and returned `Ok`.
    Succeeded(T),

    /// The action ran and returned `Err`.
    Failed(E),
}

impl<T, E> Attempt<T, E> {
    /// Whether the action ran during this call, regardless of its outcome.
    pub fn was_invoked(&self) -> bool {
        !self.is_skipped()
    }

    /// Whether the gate skipped the action.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Attempt::Skipped)
    }

    /// The action's result, or `None` if it was skipped.
    pub fn into_result(self) -> Option<Result<T, E>> {
        match self {
            Attempt::Skipped => None,
            Attempt::Succeeded(value) => Some(Ok(value)),
            Attempt::Failed(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gate that skips every other call, independent of outcomes.
    #[derive(Default)]
    struct Alternating {
        calls: u32,
    }

    impl CallGate for Alternating {
        fn attempt<F>(&mut self, action: F) -> bool
        where
            F: FnOnce() -> bool,
        {
            self.calls += 1;
            if self.calls % 2 == 0 {
                return false;
            }
            action();
            true
        }

        fn reset(&mut self) {
            self.calls = 0;
        }
    }

    #[test]
    fn test_attempt_result_uses_custom_gate() {
        let mut gate = Alternating::default();

        assert_eq!(
            gate.attempt_result(|| Ok::<_, ()>(1)),
            Attempt::Succeeded(1)
        );
        assert_eq!(gate.attempt_result(|| Ok::<_, ()>(2)), Attempt::Skipped);
        assert_eq!(
            gate.attempt_result(|| Err::<u8, _>("boom")),
            Attempt::Failed("boom")
        );

        gate.reset();
        assert!(gate.attempt_result(|| Ok::<_, ()>(3)).was_invoked());
    }

    #[test]
    fn test_skipped_attempt_does_not_run_action() {
        let mut gate = Alternating::default();
        gate.attempt(|| true);

        let mut ran = false;
        let outcome = gate.attempt_result(|| {
            ran = true;
            Ok::<_, ()>(())
        });

        assert!(!ran);
        assert!(outcome.is_skipped());
        assert_eq!(outcome.into_result(), None);
    }
}
