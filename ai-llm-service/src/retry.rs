//! Retry with exponential backoff for outbound generation calls.
//!
//! The default policy performs no retries: a failed call is reported as-is.
//! Retries only apply to errors for which [`AiLlmError::is_transient`] holds.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::error_handler::AiLlmError;

/// Configuration for retry behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,
    /// Backoff before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound for a single backoff.
    pub max_backoff: Duration,
    /// Backoff multiplier between attempts.
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }

    /// Same backoff shape, `max_retries` attempts.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::none()
        }
    }

    /// Backoff before retry number `attempt` (0-based).
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let base = self.initial_backoff.as_millis() as f64;
        let ms = base * self.backoff_multiplier.powi(attempt as i32);
        let capped = ms.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Runs `op` until it succeeds, fails permanently, or retries run out.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T, AiLlmError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AiLlmError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(err) if attempt < self.max_retries && err.is_transient() => {
                    let backoff = self.backoff_duration(attempt);
                    warn!(
                        operation = %operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error_handler::ProviderErrorKind;

    #[test]
    fn backoff_grows_and_caps() {
        let p = RetryPolicy {
            max_retries: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(350),
            backoff_multiplier: 2.0,
        };
        assert_eq!(p.backoff_duration(0), Duration::from_millis(100));
        assert_eq!(p.backoff_duration(1), Duration::from_millis(200));
        assert_eq!(p.backoff_duration(2), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy {
            initial_backoff: Duration::from_millis(1),
            ..RetryPolicy::with_max_retries(2)
        };
        let out = policy
            .run("test", move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(AiLlmError::Timeout(Duration::from_millis(5)))
                } else {
                    Ok("ok")
                }
            })
            .await
            .unwrap();
        assert_eq!(out, "ok");
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::with_max_retries(3);
        let err = policy
            .run("test", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(AiLlmError::Provider(ProviderErrorKind::EmptyChoices))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AiLlmError::Provider(ProviderErrorKind::EmptyChoices)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn default_policy_gives_up_immediately() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let err = RetryPolicy::default()
            .run("test", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(AiLlmError::Timeout(Duration::from_millis(1)))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AiLlmError::Timeout(_)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
