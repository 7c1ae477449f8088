//! Retry budget for the readiness prober.

use std::time::Duration;

/// Fixed-interval retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of connection attempts. `Settings::validate` rejects 0;
    /// a zero budget makes no attempt and times out immediately.
    pub max_attempts: u32,
    /// Delay between two attempts
    pub interval: Duration,
    /// Stop on the first unexpected failure instead of retrying it
    pub strict: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
            strict: false,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            strict: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Total sleep if every attempt fails. Connect time is not included.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 30);
        assert_eq!(policy.interval, Duration::from_secs(2));
        assert!(!policy.strict);
        assert_eq!(policy.max_wait(), Duration::from_secs(58));
    }

    #[test]
    fn test_single_attempt_never_sleeps() {
        let policy = RetryPolicy::new(1, Duration::from_secs(2));
        assert_eq!(policy.max_wait(), Duration::ZERO);
    }

    #[test]
    fn test_with_strict() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10)).with_strict(true);
        assert!(policy.strict);
        assert_eq!(policy.max_attempts, 3);
    }
}
