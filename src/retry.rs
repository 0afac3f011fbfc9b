use std::{fmt::Display, future::Future, time::Duration};

use tracing::debug;

/// Errors that know whether another attempt may succeed.
pub trait Retryable {
    fn is_transient(&self) -> bool;
}

/// Fixed-delay retry. Unbounded unless `max_attempts` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(100),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Runs `operation` until it succeeds, fails with a non transient error, or
    /// the attempt cap is reached. Every attempt is followed by `delay`,
    /// successful ones included.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let result = operation().await;
            tokio::time::sleep(self.delay).await;

            match result {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) if self.max_attempts.is_some_and(|max| attempt >= max) => {
                    debug!("Giving up after {} attempts : {}", attempt, err);
                    return Err(err);
                }
                Err(err) => {
                    debug!("Attempt {} failed, retrying : {}", attempt, err);
                }
            }
        }
    }
}
