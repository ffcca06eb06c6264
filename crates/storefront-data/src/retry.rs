//! Linear backoff for manual retries.

use std::time::Duration;

/// Delay schedule for refetches.
///
/// Retry `n` (0-based) waits `base_delay * (n + 1)` while `n` is below
/// `max_backoff_steps`; from then on retries fire immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_backoff_steps: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(1000),
            max_backoff_steps: 3,
        }
    }
}

impl RetryPolicy {
    pub fn new(base_delay: Duration, max_backoff_steps: u32) -> Self {
        Self {
            base_delay,
            max_backoff_steps,
        }
    }

    /// Delay before the next retry, `None` for an immediate one.
    pub fn delay_for(&self, retry_count: u32) -> Option<Duration> {
        if retry_count < self.max_backoff_steps {
            Some(self.base_delay.saturating_mul(retry_count + 1))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Some(Duration::from_millis(1000)));
        assert_eq!(policy.delay_for(1), Some(Duration::from_millis(2000)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_millis(3000)));
        assert_eq!(policy.delay_for(3), None);
        assert_eq!(policy.delay_for(10), None);
    }

    #[test]
    fn test_custom_schedule() {
        let policy = RetryPolicy::new(Duration::from_millis(250), 1);
        assert_eq!(policy.delay_for(0), Some(Duration::from_millis(250)));
        assert_eq!(policy.delay_for(1), None);
    }
}
