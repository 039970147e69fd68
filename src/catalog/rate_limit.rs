//! Minimum-interval gate for catalog requests.
//!
//! MusicBrainz asks clients to keep to roughly one request per second. Every
//! request, whatever the endpoint, passes through one [`RateLimiter`] owned by
//! the client instance, so two calls are never stamped closer together than
//! the configured interval.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Serializing gate enforcing a minimum gap between calls
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    /// Time the previous call passed the gate. Held across the wait so
    /// concurrent callers queue up behind each other.
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the minimum interval since the previous call has elapsed,
    /// then stamp this call.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate limiting catalog request");
                tokio::time::sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}
