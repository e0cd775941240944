//! Retrying assertions.
//!
//! Pages settle asynchronously: an uploaded image decodes after the input
//! event, a click handler restyles the container a frame later. Assertions
//! that read the page are therefore retried until they pass or a time budget
//! runs out, and only the last failure is reported.

use crate::error::ProbeError;
use core::future::Future;
use core::time::Duration;
use log::debug;
use tokio::time::{Instant, sleep};

/// How long and how often to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total time budget, measured from the first attempt.
    pub timeout: Duration,
    /// Pause between attempts.
    pub interval: Duration,
}

impl RetryPolicy {
    /// Default budget for an assertion to pass.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(4000);
    /// Default pause between attempts.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

    /// Build a policy. A zero interval is raised to one millisecond.
    #[must_use]
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            timeout,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// A policy that makes exactly one attempt.
    #[must_use]
    pub const fn once() -> Self {
        Self {
            timeout: Duration::ZERO,
            interval: Duration::from_millis(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_INTERVAL)
    }
}

/// Run `attempt` until it succeeds, fails with a non-retryable error, or the
/// policy's budget is spent.
///
/// # Errors
///
/// Returns the first non-retryable error unchanged, or
/// [`ProbeError::Timeout`] wrapping the last retryable one.
pub async fn eventually<T, F, Fut>(policy: &RetryPolicy, mut attempt: F) -> Result<T, ProbeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProbeError>>,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => {
                let waited = start.elapsed();
                if waited >= policy.timeout {
                    return Err(ProbeError::Timeout {
                        waited,
                        attempts,
                        last: Box::new(err),
                    });
                }
                debug!("attempt {attempts} failed after {waited:?}, retrying: {err}");
                sleep(policy.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// A passing attempt returns immediately.
    ///
    /// # Panics
    /// Panics if more than one attempt is made.
    #[tokio::test(start_paused = true)]
    async fn first_success_returns() {
        let calls = Cell::new(0u32);
        let result = eventually(&RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Ok::<_, ProbeError>(7) }
        })
        .await;
        assert_eq!(result.ok(), Some(7));
        assert_eq!(calls.get(), 1);
    }

    /// Retryable failures are retried until one passes.
    ///
    /// # Panics
    /// Panics if the third attempt's value is not returned.
    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let calls = Cell::new(0u32);
        let result = eventually(&RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            let current = calls.get();
            async move {
                if current < 3 {
                    Err(ProbeError::SelectorNotFound("#meme-image".to_owned()))
                } else {
                    Ok(current)
                }
            }
        })
        .await;
        assert_eq!(result.ok(), Some(3));
    }

    /// Once the budget is spent the last failure is wrapped in a timeout.
    ///
    /// # Panics
    /// Panics if the error is not a timeout around the retried failure.
    #[tokio::test(start_paused = true)]
    async fn gives_up_after_timeout() {
        let policy = RetryPolicy::new(Duration::from_millis(200), Duration::from_millis(50));
        let result: Result<(), _> = eventually(&policy, || async {
            Err(ProbeError::mismatch("border", "3px dashed rgb(255, 0, 0)", "none"))
        })
        .await;
        assert!(
            matches!(
                &result,
                Err(ProbeError::Timeout { attempts, last, .. })
                    if *attempts >= 4 && matches!(**last, ProbeError::Mismatch { .. })
            ),
            "{result:?}"
        );
    }

    /// Configuration errors are not retried.
    ///
    /// # Panics
    /// Panics if a non-retryable error is retried or wrapped.
    #[tokio::test(start_paused = true)]
    async fn non_retryable_errors_fail_fast() {
        let calls = Cell::new(0u32);
        let result: Result<(), _> = eventually(&RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Err(ProbeError::Config("MEME_BASE_URL is not set".to_owned())) }
        })
        .await;
        assert!(matches!(result, Err(ProbeError::Config(_))));
        assert_eq!(calls.get(), 1);
    }

    /// A single-shot policy reports a timeout after one attempt.
    ///
    /// # Panics
    /// Panics if more than one attempt is made.
    #[tokio::test(start_paused = true)]
    async fn once_makes_one_attempt() {
        let result: Result<(), _> = eventually(&RetryPolicy::once(), || async {
            Err(ProbeError::SelectorNotFound("#fire".to_owned()))
        })
        .await;
        assert!(matches!(
            result,
            Err(ProbeError::Timeout { attempts: 1, .. })
        ));
    }
}
