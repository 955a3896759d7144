//! Retry driver for idempotent operations.
//!
//! # Responsibilities
//! - Run an operation once, or repeatedly under a [`BackoffPolicy`]
//! - Distinguish retryable from permanent failures
//! - Sleep between attempts, never after the last one
//!
//! # Design Decisions
//! - Callers classify their own failures via [`Attempt`]
//! - A disabled policy means a single attempt with no wrapper at all
//! - Only idempotent calls (GET) are ever passed through here

use std::future::Future;

use crate::resilience::backoff::BackoffPolicy;

/// Outcome classification of one failed attempt.
#[derive(Debug)]
pub enum Attempt<E> {
    /// Transient failure; try again if the budget allows.
    Retryable(E),
    /// Failure that retrying cannot fix.
    Permanent(E),
}

impl<E> Attempt<E> {
    pub fn into_inner(self) -> E {
        match self {
            Attempt::Retryable(e) | Attempt::Permanent(e) => e,
        }
    }
}

/// Run `op` under `policy`.
///
/// `op` receives the zero-based attempt number. Returns the first success,
/// the first permanent failure, or the last retryable failure once the
/// retry budget is spent.
pub async fn retry<T, E, F, Fut>(policy: &BackoffPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, Attempt<E>>>,
    E: std::fmt::Display,
{
    if !policy.is_enabled() {
        return op(0).await.map_err(Attempt::into_inner);
    }

    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(Attempt::Permanent(e)) => return Err(e),
            Err(Attempt::Retryable(e)) => {
                if attempt >= policy.max_retries() {
                    tracing::warn!(attempts = attempt + 1, error = %e, "Retry budget exhausted");
                    return Err(e);
                }
                attempt += 1;
                let delay = policy.delay(attempt);
                tracing::info!(attempt, delay = ?delay, error = %e, "Retrying request");
                tokio::time::sleep(delay).await;
            }
        }
    }
}
