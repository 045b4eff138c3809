//! Integration tests for fail limiter progressions

use failgate::prelude::*;
use rstest::rstest;

/// Drive an always-failing action `calls` times and return the 1-based
/// indices of the calls that invoked it.
fn invoked_calls(limiter: &mut FailLimiter, calls: usize) -> Vec<usize> {
    (1..=calls)
        .filter(|_| limiter.attempt(|| false))
        .collect()
}

#[rstest]
#[case::default(0, 0, vec![1, 3, 6, 11])]
#[case::capped(0, 2, vec![1, 3, 6, 9, 12])]
#[case::slow(2, 0, vec![1, 3, 5, 8, 11])]
#[case::slow_and_capped(2, 1, vec![1, 3, 5, 7, 9, 11])]
#[case::negative_interval(-1, 0, vec![1, 3, 6, 11])]
fn test_fail_progression(
    #[case] backoff_interval: i32,
    #[case] skip_limit: i32,
    #[case] expected: Vec<usize>,
) {
    let mut limiter = FailLimiter::builder()
        .backoff_interval(backoff_interval)
        .skip_limit(skip_limit)
        .build();

    assert_eq!(invoked_calls(&mut limiter, 12), expected);
}

#[test]
fn test_reset_leads_to_immediate_retry() {
    let mut limiter = FailLimiter::new();
    limiter.attempt(|| false);
    limiter.reset();

    assert!(
        limiter.attempt(|| false),
        "Reset did not lead to immediate retry"
    );
    assert!(
        !limiter.attempt(|| false),
        "Skipping does not work after reset"
    );
    assert!(
        limiter.attempt(|| false),
        "Reset seemingly did not reset fail count"
    );
}

#[test]
fn test_reset_mid_backoff() {
    let mut limiter = FailLimiter::new();
    for _ in 0..6 {
        limiter.attempt(|| false);
    }
    assert!(limiter.is_backing_off());

    limiter.reset();
    assert_eq!(invoked_calls(&mut limiter, 12), vec![1, 3, 6, 11]);
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Succeeded,
    Failed(String),
    Skipped,
}

fn picky_action(parameter: usize) -> Result<(), String> {
    if parameter > 3 {
        return Err("large numbers are rejected".to_string());
    }
    Ok(())
}

#[test]
fn test_error_captured_from_closure() {
    let mut limiter = FailLimiter::new();
    let mut outcomes = Vec::new();

    for i in 1..=12 {
        let mut err = None;
        let tried = limiter.attempt(|| match picky_action(i) {
            Ok(()) => true,
            Err(e) => {
                err = Some(e);
                false
            }
        });

        outcomes.push(match (tried, err) {
            (false, _) => Outcome::Skipped,
            (true, None) => Outcome::Succeeded,
            (true, Some(e)) => Outcome::Failed(e),
        });
    }

    let failed = || Outcome::Failed("large numbers are rejected".to_string());
    assert_eq!(
        outcomes,
        vec![
            Outcome::Succeeded,
            Outcome::Succeeded,
            Outcome::Succeeded,
            failed(),
            Outcome::Skipped,
            failed(),
            Outcome::Skipped,
            Outcome::Skipped,
            failed(),
            Outcome::Skipped,
            Outcome::Skipped,
            Outcome::Skipped,
        ]
    );
}

#[test]
fn test_attempt_result_matches_closure_capture() {
    let mut gate: BackoffGate = FailLimiter::new();

    let outcomes: Vec<Attempt<(), String>> = (1..=12)
        .map(|i| gate.attempt_result(|| picky_action(i)))
        .collect();

    let invoked: Vec<usize> = outcomes
        .iter()
        .enumerate()
        .filter(|(_, outcome)| outcome.was_invoked())
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(invoked, vec![1, 2, 3, 4, 6, 9]);
    assert_eq!(outcomes[2], Attempt::Succeeded(()));
    assert!(matches!(outcomes[3], Attempt::Failed(_)));
}

#[test]
fn test_recovery_after_backoff() {
    let mut limiter = FailLimiter::builder().skip_limit(4).build();
    let mut healthy = false;

    for _ in 0..20 {
        limiter.attempt(|| healthy);
    }
    assert!(limiter.fails_in_a_row() > 0);

    healthy = true;
    let mut calls_until_recovery = 0;
    while !limiter.attempt(|| healthy) {
        calls_until_recovery += 1;
    }

    assert!(calls_until_recovery <= 4);
    assert_eq!(limiter.state(), GateState::Active);
    assert_eq!(limiter.fails_in_a_row(), 0);
}

#[tokio::test]
async fn test_shared_limiter_across_tasks() {
    let limiter = SharedFailLimiter::with_config(LimiterConfig::new(2, 0));

    let mut invoked = Vec::new();
    for call in 1..=12 {
        let handle = limiter.clone();
        let tried = tokio::spawn(async move { handle.attempt(|| false).await })
            .await
            .unwrap();
        if tried {
            invoked.push(call);
        }
    }

    assert_eq!(invoked, vec![1, 3, 5, 8, 11]);
}
