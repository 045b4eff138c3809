//! Example: Throttling a failing action with `FailLimiter`
//!
//! This example demonstrates:
//! 1. The default progression (skip quota doubles after every failure)
//! 2. A capped progression (`skip_limit`)
//! 3. A slow progression (`backoff_interval`)
//! 4. Passing errors out of the action through a closure
//!
//! Run with:
//! ```bash
//! RUST_LOG=failgate=debug cargo run -p failgate --example fail_progression
//! ```

use failgate::prelude::*;
use tracing_subscriber::EnvFilter;

fn always_fails() -> bool {
    false
}

fn run_progression(title: &str, mut limiter: FailLimiter) {
    println!("\n=== {} ===", title);
    for i in 1..=12 {
        if limiter.attempt(always_fails) {
            println!("#{:02}: Executed action.", i);
        } else {
            println!("#{:02}: Skipped action.", i);
        }
    }
}

fn rejects_large_numbers(parameter: i32) -> Result<(), String> {
    if parameter > 3 {
        return Err("I don't like large numbers".to_string());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    run_progression("Default progression", FailLimiter::new());
    run_progression(
        "Capped progression (skip_limit = 2)",
        FailLimiter::builder().skip_limit(2).build(),
    );
    run_progression(
        "Slow progression (backoff_interval = 2)",
        FailLimiter::builder().backoff_interval(2).build(),
    );

    println!("\n=== Capturing errors ===");
    let mut limiter = FailLimiter::new();
    for i in 1..=12 {
        // Parameters go in and errors come out through the closure.
        let mut err = None;
        let tried = limiter.attempt(|| {
            err = rejects_large_numbers(i).err();
            err.is_none()
        });

        match (tried, err) {
            (false, _) => println!("#{:02}: Skipped action.", i),
            (true, Some(e)) => println!("#{:02}: Executed action, but failed: {}", i, e),
            (true, None) => println!("#{:02}: Executed action and succeeded.", i),
        }
    }
}
