// Opt-in retry with exponential backoff
//
// Offered to callers as a composable building block; the dispatcher never
// invokes it on its own. The backoff is pure exponential with no jitter
// and no cap, and the last failure is re-raised unchanged.

use std::future::Future;
use std::time::Duration;

/// Runs `operation` up to `max_attempts` times, sleeping
/// `base_delay * 2^attempt_index` between attempts.
///
/// On success the value is returned immediately. After the final attempt
/// fails, the last observed error is returned unchanged — no wrapping.
/// `max_attempts` of 0 is treated as 1: the operation always runs once.
///
/// Generic over the error type, so it composes with any fallible async
/// operation, not just dispatcher calls.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use browsergrid::retry::retry;
///
/// let report = retry(
///     || client.health(),
///     3,
///     Duration::from_millis(100),
/// )
/// .await?;
/// ```
pub async fn retry<T, E, F, Fut>(
    mut operation: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt += 1;
                if attempt >= attempts {
                    return Err(error);
                }
                let delay = base_delay * 2u32.saturating_pow(attempt - 1);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_success_on_first_attempt_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, &str> = retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(7) }
            },
            5,
            Duration::from_millis(100),
        )
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_re_raises_last_error_unchanged() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = retry(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(format!("boom {n}")) }
            },
            3,
            Duration::from_millis(1),
        )
        .await;
        assert_eq!(result.unwrap_err(), "boom 3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), &str> = retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("nope") }
            },
            0,
            Duration::from_millis(1),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
