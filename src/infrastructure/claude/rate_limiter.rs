//! Token bucket rate limiter for outgoing API calls
//!
//! Tokens refill continuously at `refill_rate` per second up to `capacity`.
//! Each request consumes one token; callers wait when the bucket is empty.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::trace;

/// Token bucket shared by every request of one client.
#[derive(Clone)]
pub struct TokenBucketRateLimiter {
    tokens: Arc<Mutex<f64>>,
    capacity: f64,
    refill_rate: f64,
    last_refill: Arc<Mutex<Instant>>,
}

impl TokenBucketRateLimiter {
    /// Create a limiter allowing `requests_per_second` sustained and
    /// `burst` back-to-back requests. Non-positive inputs are raised to the
    /// smallest usable values; config validation rejects them earlier.
    pub fn new(requests_per_second: f64, burst: u32) -> Self {
        let refill_rate = if requests_per_second > 0.0 {
            requests_per_second
        } else {
            0.01
        };
        let capacity = f64::from(burst.max(1));

        Self {
            tokens: Arc::new(Mutex::new(capacity)),
            capacity,
            refill_rate,
            last_refill: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Wait until a token is available, then consume it.
    pub async fn acquire(&self) {
        loop {
            let mut tokens = self.tokens.lock().await;
            let mut last_refill = self.last_refill.lock().await;

            let now = Instant::now();
            let elapsed = now.duration_since(*last_refill).as_secs_f64();
            let new_tokens = (*tokens + elapsed * self.refill_rate).min(self.capacity);

            if new_tokens >= 1.0 {
                *tokens = new_tokens - 1.0;
                *last_refill = now;
                break;
            }

            let tokens_needed = 1.0 - new_tokens;
            let wait_duration = Duration::from_secs_f64((tokens_needed / self.refill_rate).max(0.01));

            drop(tokens);
            drop(last_refill);

            trace!(?wait_duration, "rate limited; waiting for token");
            sleep(wait_duration).await;
        }
    }

    /// Tokens available right now, refill included.
    pub async fn available_tokens(&self) -> f64 {
        let tokens = self.tokens.lock().await;
        let last_refill = self.last_refill.lock().await;

        let elapsed = Instant::now().duration_since(*last_refill).as_secs_f64();
        (*tokens + elapsed * self.refill_rate).min(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_is_immediate() {
        let limiter = TokenBucketRateLimiter::new(1.0, 3);

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() < Duration::from_millis(200));
        assert!(limiter.available_tokens().await < 1.0);
    }

    #[tokio::test]
    async fn test_enforces_delay_after_burst() {
        let limiter = TokenBucketRateLimiter::new(2.0, 2);

        limiter.acquire().await;
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        let elapsed = start.elapsed();

        assert!(
            elapsed >= Duration::from_millis(400),
            "Expected delay >= 400ms, got {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_zero_burst_still_allows_one() {
        let limiter = TokenBucketRateLimiter::new(5.0, 0);
        limiter.acquire().await;
        assert!(limiter.available_tokens().await <= 1.0);
    }
}
