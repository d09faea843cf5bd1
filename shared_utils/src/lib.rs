//! Helpers shared by the server crates: retrying backend calls with
//! exponential backoff.

use std::time::Duration;

use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{error, warn};

/// Backoff settings for `retry_async`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub initial_delay_millis: u64,
    pub max_delay_secs: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
}

impl RetryConfig {
    #[must_use]
    pub fn new(initial_delay_millis: u64, max_delay_secs: u64, max_retries: u32) -> Self {
        Self {
            initial_delay_millis,
            max_delay_secs,
            max_retries,
        }
    }

    /// Upper bound on how often the operation runs.
    #[must_use]
    pub fn total_attempts(&self) -> usize {
        self.max_retries as usize + 1
    }

    fn strategy(&self) -> impl Iterator<Item = Duration> + Clone {
        ExponentialBackoff::from_millis(self.initial_delay_millis)
            .max_delay(Duration::from_secs(self.max_delay_secs))
            .take(self.max_retries as usize)
    }
}

impl Default for RetryConfig {
    /// 50 ms initial delay, capped at 2 s, 3 retries.
    fn default() -> Self {
        Self {
            initial_delay_millis: 50,
            max_delay_secs: 2,
            max_retries: 3,
        }
    }
}

/// Runs `operation` until it succeeds or the retries in `config` run out,
/// returning the last error in that case.
///
/// `context` names the call site in the warn/error events.
pub async fn retry_async<F, Fut, T, E>(
    context: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    let result = Retry::spawn(config.strategy(), || {
        let fut = operation();
        async move {
            fut.await.map_err(|err| {
                warn!(error = ?err, retry_context = context, "Operation failed; retrying");
                err
            })
        }
    })
    .await;

    if let Err(err) = &result {
        error!(
            error = ?err,
            retry_context = context,
            attempts = config.total_attempts(),
            "Operation failed after exhausting retries"
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig::new(1, 1, max_retries)
    }

    #[test]
    fn first_success_runs_once() {
        tokio_test::block_on(async {
            let attempts = AtomicUsize::new(0);

            let result: Result<&str, &str> = retry_async("select_sections", fast(3), || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Ok("sections") }
            })
            .await;

            assert_eq!(result, Ok("sections"));
            assert_eq!(attempts.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn transient_failures_are_retried() {
        tokio_test::block_on(async {
            let attempts = Arc::new(AtomicUsize::new(0));
            let tracker = attempts.clone();

            let result = retry_async("select_city", fast(3), move || {
                let tracker = tracker.clone();
                async move {
                    if tracker.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("connection reset")
                    } else {
                        Ok("berlin")
                    }
                }
            })
            .await;

            assert_eq!(result, Ok("berlin"));
            assert_eq!(attempts.load(Ordering::SeqCst), 3);
        });
    }

    #[test]
    fn last_error_is_returned_after_exhausting_retries() {
        tokio_test::block_on(async {
            let attempts = Arc::new(AtomicUsize::new(0));
            let tracker = attempts.clone();
            let config = fast(2);

            let result: Result<(), String> = retry_async("submit_contact", config, move || {
                let tracker = tracker.clone();
                async move {
                    let attempt = tracker.fetch_add(1, Ordering::SeqCst);
                    Err(format!("attempt {attempt}"))
                }
            })
            .await;

            assert_eq!(result, Err("attempt 2".to_owned()));
            assert_eq!(attempts.load(Ordering::SeqCst), config.total_attempts());
        });
    }

    #[test]
    fn default_matches_documented_backoff() {
        let config = RetryConfig::default();
        assert_eq!(config, RetryConfig::new(50, 2, 3));
        assert_eq!(config.total_attempts(), 4);
        assert_eq!(config.strategy().count(), 3);
    }
}
