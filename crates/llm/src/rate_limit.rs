//! Client-side rolling-window rate limiting.
//!
//! Free-tier LLM keys enforce strict per-minute caps. Waiting locally is
//! cheaper than eating a 429 and losing the request, so each provider
//! client gates its calls through one of these.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

const WINDOW: Duration = Duration::from_secs(60);

/// Rolling 60-second request limiter for one provider key.
///
/// `acquire` never rejects; at worst it sleeps until the oldest recorded
/// request ages out of the window.
pub struct RateLimiter {
    max_per_window: usize,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_per_minute: u32) -> Self {
        Self {
            max_per_window: max_per_minute.max(1) as usize,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Block until issuing another request stays within the cap, then
    /// record the request.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut stamps = self.timestamps.lock().await;
                let now = Instant::now();
                while let Some(front) = stamps.front() {
                    if now.duration_since(*front) >= WINDOW {
                        stamps.pop_front();
                    } else {
                        break;
                    }
                }
                if stamps.len() < self.max_per_window {
                    stamps.push_back(now);
                    None
                } else {
                    // Sleep outside the lock so other tasks can line up.
                    stamps
                        .front()
                        .map(|front| WINDOW - now.duration_since(*front))
                }
            };
            match wait {
                None => return,
                Some(delay) => {
                    debug!(
                        delay_ms = delay.as_millis() as u64,
                        "rate limit reached, waiting for window rollover"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn allows_up_to_the_cap_without_waiting() {
        let limiter = RateLimiter::new(3);
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_window_once_saturated() {
        let limiter = RateLimiter::new(2);
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= WINDOW);
    }

    #[tokio::test(start_paused = true)]
    async fn slots_free_up_as_old_requests_age_out() {
        let limiter = RateLimiter::new(1);
        limiter.acquire().await;
        tokio::time::advance(WINDOW).await;
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_cap_is_clamped_to_one() {
        let limiter = RateLimiter::new(0);
        limiter.acquire().await;
    }
}
