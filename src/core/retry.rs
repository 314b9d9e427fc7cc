//! Bounded retries for fallible async operations.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::Result;

/// How often and how patiently to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub retries: u32,
    /// Wait before retry `n` is `delay * n`
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn no_delay(retries: u32) -> Self {
        Self {
            retries,
            delay: Duration::ZERO,
        }
    }
}

/// Run `op` until it succeeds or `policy.retries` retries are used up,
/// returning the last error in that case.
pub async fn with_retries<T, F, Fut>(label: &str, policy: RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.retries => {
                attempt += 1;
                warn!(
                    task = label,
                    attempt,
                    retries = policy.retries,
                    error = %e,
                    "attempt failed, retrying"
                );
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay * attempt).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SleeperError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retries("ok", RetryPolicy::no_delay(2), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, SleeperError>(7)
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retries("flaky", RetryPolicy::no_delay(2), move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(SleeperError::NoData)
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> = with_retries("broken", RetryPolicy::no_delay(2), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(SleeperError::NoData)
        })
        .await;

        assert!(matches!(result, Err(SleeperError::NoData)));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 2);
        assert_eq!(policy.delay, Duration::from_millis(500));
    }
}
