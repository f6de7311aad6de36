//! Polite inter-request pacing for archive scraping.
//!
//! The archive source gets one snapshot fetch per ~100 ms during a
//! yearly aggregation; upstream errors stretch the interval so a
//! struggling origin is not hammered.

use std::thread;
use std::time::{Duration, Instant};

/// Enforces a minimum interval between requests, doubling it after a
/// failed fetch and snapping back to the base after a success.
pub struct RateLimiter {
    name: String,
    last_request: Option<Instant>,
    current_interval: Duration,
    base_interval: Duration,
    max_interval: Duration,
}

impl RateLimiter {
    /// * `name` — label for log messages (e.g. "archive")
    /// * `base_interval` — minimum time between requests
    /// * `max_interval` — upper bound after repeated failures
    pub fn new(name: &str, base_interval: Duration, max_interval: Duration) -> Self {
        RateLimiter {
            name: name.to_string(),
            last_request: None,
            current_interval: base_interval,
            base_interval,
            max_interval,
        }
    }

    /// Convenience: base interval in milliseconds, max 16× base.
    pub fn from_millis(name: &str, millis: u64) -> Self {
        let base = Duration::from_millis(millis);
        Self::new(name, base, base * 16)
    }

    /// Sleep until the interval since the previous request has passed.
    /// Must be called *before* making a request.
    pub fn wait_if_needed(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.current_interval {
                thread::sleep(self.current_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }

    /// Report a successful request; the interval returns to the base.
    pub fn report_success(&mut self) {
        self.current_interval = self.base_interval;
    }

    /// Report a failed request; the interval doubles, up to the max.
    pub fn report_failure(&mut self) {
        let doubled = self.current_interval * 2;
        self.current_interval = doubled.min(self.max_interval);
        println!(
            "  [{}] backing off to {:.1}s between requests",
            self.name,
            self.current_interval.as_secs_f64()
        );
    }

    #[cfg(test)]
    fn interval(&self) -> Duration {
        self.current_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_doubles_up_to_max() {
        let mut limiter = RateLimiter::from_millis("test", 100);
        assert_eq!(limiter.interval(), Duration::from_millis(100));
        limiter.report_failure();
        assert_eq!(limiter.interval(), Duration::from_millis(200));
        for _ in 0..10 {
            limiter.report_failure();
        }
        assert_eq!(limiter.interval(), Duration::from_millis(1600));
    }

    #[test]
    fn test_success_resets_to_base() {
        let mut limiter = RateLimiter::from_millis("test", 100);
        limiter.report_failure();
        limiter.report_failure();
        limiter.report_success();
        assert_eq!(limiter.interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_first_request_does_not_wait() {
        let mut limiter = RateLimiter::from_millis("test", 5000);
        let start = Instant::now();
        limiter.wait_if_needed();
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
