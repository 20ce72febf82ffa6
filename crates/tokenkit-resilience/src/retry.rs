//! Bounded fixed-delay retry
//!
//! Re-runs an operation a fixed number of times, sleeping a constant delay
//! between a failed attempt and the next one. The delay never grows.

use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Attempts used for a deployment confirmation wait
pub const DEPLOYMENT_CONFIRMATION_ATTEMPTS: u32 = 5;

/// Delay between deployment confirmation attempts
pub const DEPLOYMENT_CONFIRMATION_DELAY: Duration = Duration::from_secs(10);

/// Retry policy with a constant delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelayRetry {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Delay inserted after each failed attempt that is not the last
    pub delay: Duration,
}

impl FixedDelayRetry {
    /// Create a new policy. Zero attempts is treated as one.
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        let max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        Self { max_attempts, delay }
    }

    /// Policy for waiting on a contract-creation transaction: 5 attempts, 10 seconds apart
    pub const fn deployment_confirmation() -> Self {
        Self::new(DEPLOYMENT_CONFIRMATION_ATTEMPTS, DEPLOYMENT_CONFIRMATION_DELAY)
    }
}

impl Default for FixedDelayRetry {
    fn default() -> Self {
        Self::deployment_confirmation()
    }
}

/// Run `f` under `policy`.
///
/// `f` receives the 1-based attempt number. The first `Ok` is returned
/// immediately; when every attempt fails the last error is returned inside
/// [`RetryError`].
pub async fn with_retry<F, Fut, T, E>(
    policy: &FixedDelayRetry,
    label: &str,
    mut f: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match f(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(label, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => {
                let retries_left = policy.max_attempts - attempt;
                tracing::warn!(
                    label,
                    attempt,
                    retries_left,
                    error = %e,
                    "Waiting for {label}... ({retries_left} retries left)"
                );
                last_error = Some(e);

                if retries_left > 0 && !policy.delay.is_zero() {
                    tracing::trace!(delay = ?policy.delay, "Waiting before retry");
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(RetryError {
        attempts: policy.max_attempts,
        last_error,
    })
}

/// Error when all attempts are exhausted
#[derive(Debug)]
pub struct RetryError<E> {
    /// Number of attempts made
    pub attempts: u32,
    /// Last error encountered
    pub last_error: Option<E>,
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "All {} attempts failed", self.attempts)?;
        if let Some(ref e) = self.last_error {
            write!(f, "; last error: {}", e)?;
        }
        Ok(())
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.last_error.as_ref().map(|e| e as _)
    }
}
