use std::future::Future;
use std::time::Duration;

use crate::error::{CampusError, Result};

/// Bounded retry with a fixed delay between attempts.
///
/// `max_attempts` counts the first try, so `max_attempts = 3` means at most
/// two retries and at most two delays. No delay follows the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// A zero `max_attempts` is treated as 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Same attempt budget, no waiting. Used in tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `attempt` until it succeeds, fails permanently, or the budget is
    /// spent. Exhaustion yields [`CampusError::Generation`] wrapping the last
    /// error; permanent errors are returned unchanged.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut tries = 0;

        loop {
            tries += 1;

            let error = match attempt().await {
                Ok(value) => {
                    if tries > 1 {
                        tracing::info!(operation, attempt = tries, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }

            if tries >= self.max_attempts {
                tracing::error!(
                    operation,
                    attempts = tries,
                    error = %error,
                    "Giving up after exhausting retries"
                );
                return Err(CampusError::Generation {
                    attempts: tries,
                    source: Box::new(error),
                });
            }

            tracing::warn!(
                operation,
                attempt = tries,
                max_attempts = self.max_attempts,
                error = %error,
                "Attempt failed, retrying"
            );

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn returns_first_success_without_retry() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::immediate(3)
            .run("op", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, CampusError>(7)
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::immediate(3)
            .run("op", || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(CampusError::Llm("flaky".into()))
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhaustion_wraps_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate(3)
            .run("op", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(CampusError::Llm(format!("failure {n}")))
            })
            .await;

        match result {
            Err(CampusError::Generation { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert!(source.to_string().contains("failure 3"));
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::immediate(3)
            .run("op", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CampusError::LlmUnavailable("no model".into()))
            })
            .await;

        assert!(matches!(result, Err(CampusError::LlmUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_fixed_delay_between_attempts_only() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();
        let _: Result<()> = RetryPolicy::new(3, Duration::from_secs(1))
            .run("op", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(CampusError::Llm("down".into()))
            })
            .await;

        // three attempts, two gaps
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn zero_attempts_means_one() {
        assert_eq!(RetryPolicy::immediate(0).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().max_attempts(), 3);
        assert_eq!(RetryPolicy::default().delay(), Duration::from_secs(1));
    }
}
