use crate::infrastructure::repositories::ExternalApiError;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Fixed,
    /// Doubles the delay after each failed attempt, capped at `max`
    Exponential { max: Duration },
}

/// Bounded retry budget owned by each provider integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff: Backoff,
    /// Upper bound on a single attempt
    pub timeout: Duration,
}

impl RetryPolicy {
    pub const fn fixed(max_attempts: u32, delay: Duration, timeout: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: Backoff::Fixed,
            timeout,
        }
    }

    pub const fn exponential(
        max_attempts: u32,
        min_delay: Duration,
        max_delay: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            max_attempts,
            delay: min_delay,
            backoff: Backoff::Exponential { max: max_delay },
            timeout,
        }
    }

    fn next_delay(&self, current: Duration) -> Duration {
        match self.backoff {
            Backoff::Fixed => current,
            Backoff::Exponential { max } => current
                .checked_mul(2)
                .map(|next| next.min(max))
                .unwrap_or(max),
        }
    }

    /// Run `f` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent. The last error is returned.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut f: F) -> Result<T, ExternalApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ExternalApiError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut delay = self.delay;
        let mut attempt = 1;

        loop {
            let result = match tokio::time::timeout(self.timeout, f()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        operation = operation,
                        attempt = attempt,
                        timeout_secs = self.timeout.as_secs_f64(),
                        "External API call timed out"
                    );
                    Err(ExternalApiError::transient())
                }
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() || attempt >= attempts => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        operation = operation,
                        attempt = attempt,
                        max_attempts = attempts,
                        retry_in_ms = delay.as_millis() as u64,
                        error = %e,
                        "External API call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = self.next_delay(delay);
                    attempt += 1;
                }
            }
        }
    }
}
