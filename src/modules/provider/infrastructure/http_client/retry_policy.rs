//! Retry policy for outbound requests.
//!
//! Delay selection honors server-advertised rate-limit signals first and only
//! falls back to exponential backoff when the response carries none.

use rand::Rng;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts per logical request
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Exponential backoff capped at `max_delay`, before jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let multiplier = 2u64.saturating_pow(attempt.min(32));
        let delay = self
            .base_delay
            .checked_mul(multiplier.min(u32::MAX as u64) as u32)
            .unwrap_or(self.max_delay);
        delay.min(self.max_delay)
    }

    /// Delay for the next retry: server signal when present, otherwise capped
    /// exponential backoff plus 0-100ms of jitter so concurrent callers do not
    /// retry in lockstep.
    pub fn delay_for(&self, attempt: u32, headers: &reqwest::header::HeaderMap) -> Duration {
        if let Some(server_delay) = rate_limit_signal(headers) {
            return server_delay.min(self.max_delay);
        }

        let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..100));
        self.backoff_delay(attempt) + jitter
    }
}

/// Extract a delay from rate-limit response headers, if any.
fn rate_limit_signal(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    for name in ["retry-after", "x-ratelimit-reset"] {
        if let Some(raw) = headers.get(name).and_then(|h| h.to_str().ok()) {
            if let Some(delay) = parse_rate_limit_value(raw.trim()) {
                return Some(delay);
            }
        }
    }
    None
}

/// Interpret a rate-limit header value.
///
/// Values long enough to be seconds-since-epoch (10+ digits) are treated as a
/// future unix timestamp; anything shorter is a plain seconds count.
pub fn parse_rate_limit_value(raw: &str) -> Option<Duration> {
    let value = raw.parse::<u64>().ok()?;
    if raw.len() >= 10 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Some(Duration::from_secs(value.saturating_sub(now)))
    } else {
        Some(Duration::from_secs(value))
    }
}

/// Determines if a transport-level error is worth retrying
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}
