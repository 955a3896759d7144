//! Exponential backoff policy.

use rand::Rng;
use std::time::Duration;

use crate::config::RetryConfig;

/// Stateless retry schedule: exponential delay from a base wait, bounded
/// by a maximum number of retries beyond the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    base: Duration,
    max_retries: u32,
    max_delay: Option<Duration>,
    jitter: bool,
}

impl BackoffPolicy {
    /// Create a policy with the given base wait and retry budget.
    ///
    /// A `max_retries` of 0 disables retrying entirely.
    pub fn new(base: Duration, max_retries: u32) -> Self {
        Self {
            base,
            max_retries,
            max_delay: None,
            jitter: false,
        }
    }

    /// A policy that performs exactly one attempt.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    /// Cap every computed delay at `max_delay`.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Add up to 10% random jitter on top of each delay.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Whether failed attempts are retried at all.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Delay to wait before retry number `attempt` (1-based).
    ///
    /// Attempt 0 is the initial call and never waits.
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_ms = u64::try_from(self.base.as_millis()).unwrap_or(u64::MAX);
        let factor = 2u64.saturating_pow(attempt - 1);
        let mut delay_ms = base_ms.saturating_mul(factor);
        if let Some(max) = self.max_delay {
            delay_ms = delay_ms.min(u64::try_from(max.as_millis()).unwrap_or(u64::MAX));
        }

        // Jitter (0 to 10% of the delay)
        let jitter_range = delay_ms / 10;
        let jitter = if self.jitter && jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(delay_ms.saturating_add(jitter))
    }
}

impl From<&RetryConfig> for BackoffPolicy {
    fn from(config: &RetryConfig) -> Self {
        let mut policy = BackoffPolicy::new(
            Duration::from_millis(config.base_delay_ms),
            config.max_retries,
        )
        .with_jitter(config.jitter);
        if config.max_delay_ms > 0 {
            policy = policy.with_max_delay(Duration::from_millis(config.max_delay_ms));
        }
        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_growth() {
        let policy = BackoffPolicy::new(Duration::from_millis(100), 5);
        assert_eq!(policy.delay(0), Duration::ZERO);
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(2), Duration::from_millis(200));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
        assert_eq!(policy.delay(4), Duration::from_millis(800));
    }

    #[test]
    fn test_delay_cap() {
        let policy = BackoffPolicy::new(Duration::from_millis(100), 10)
            .with_max_delay(Duration::from_millis(1000));
        assert_eq!(policy.delay(10), Duration::from_millis(1000));
    }

    #[test]
    fn test_large_attempt_saturates() {
        let policy = BackoffPolicy::new(Duration::from_secs(1), u32::MAX);
        assert!(policy.delay(200) >= Duration::from_secs(1));
    }

    #[test]
    fn test_jitter_bounds() {
        let policy = BackoffPolicy::new(Duration::from_millis(100), 3).with_jitter(true);
        for _ in 0..50 {
            let d = policy.delay(2);
            assert!(d >= Duration::from_millis(200));
            assert!(d < Duration::from_millis(220));
        }
    }

    #[test]
    fn test_disabled() {
        let policy = BackoffPolicy::disabled();
        assert!(!policy.is_enabled());
        assert_eq!(policy.max_retries(), 0);
    }

    #[test]
    fn test_from_config() {
        let config = RetryConfig {
            base_delay_ms: 50,
            max_retries: 2,
            max_delay_ms: 0,
            jitter: false,
        };
        let policy = BackoffPolicy::from(&config);
        assert_eq!(policy.base(), Duration::from_millis(50));
        assert_eq!(policy.max_retries(), 2);
        assert_eq!(policy.delay(3), Duration::from_millis(200));
    }
}
