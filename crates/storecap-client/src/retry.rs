// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// Retry budget for idempotent reads. Submissions are never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

pub trait BackoffPolicy {
    fn delay_for_attempt(&self, attempt: usize) -> Duration;
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_backoff_ms: 120,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_backoff_ms: 0,
        }
    }

    /// Transport failures, `429` and `5xx` are worth another attempt.
    #[must_use]
    pub fn is_retryable_status(status: Option<u16>) -> bool {
        match status {
            None => true,
            Some(code) => code == 429 || (500..600).contains(&code),
        }
    }
}

impl BackoffPolicy for RetryPolicy {
    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        Duration::from_millis(self.base_backoff_ms.saturating_mul(attempt as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_linearly() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(120));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(360));
        assert_eq!(RetryPolicy::single_attempt().delay_for_attempt(2), Duration::ZERO);
    }

    #[test]
    fn client_errors_are_not_retried() {
        assert!(RetryPolicy::is_retryable_status(None));
        assert!(RetryPolicy::is_retryable_status(Some(503)));
        assert!(RetryPolicy::is_retryable_status(Some(429)));
        assert!(!RetryPolicy::is_retryable_status(Some(404)));
        assert!(!RetryPolicy::is_retryable_status(Some(400)));
    }
}
