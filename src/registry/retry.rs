// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;
use std::time::Duration;

use crate::config::consts::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS};
use crate::errors::RegistryResult;
use crate::observability::messages::{registry::*, StructuredLog};

/// Bounded retry with a fixed delay between attempts.
///
/// Only errors for which [`crate::errors::RegistryError::is_retryable`] holds
/// are retried; anything else is returned from the attempt that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds or attempts run out.
    ///
    /// `operation` receives the 1-based attempt number. The error of the last
    /// attempt is returned.
    pub async fn run<T, F, Fut>(&self, host: &str, mut operation: F) -> RegistryResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = RegistryResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if !error.is_retryable() => return Err(error),
                Err(error) => {
                    AttemptFailed {
                        host,
                        attempt,
                        max_attempts,
                        error: &error,
                    }
                    .log();

                    if attempt >= max_attempts {
                        InitializationFailed {
                            host,
                            attempts: attempt,
                        }
                        .log();
                        return Err(error);
                    }
                }
            }

            tokio::time::sleep(self.delay).await;
            attempt += 1;
        }
    }
}
