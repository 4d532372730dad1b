use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Duration};

use crate::error::FormError;

/// Rate limiter for a single form instance (unkeyed)
pub type UnkeyedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Longest window a limiter accepts; longer windows are clamped.
pub const MAX_WINDOW_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Attempts allowed within a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub attempts: u32,
    pub window_seconds: u64,
}

/// Create an unkeyed rate limiter allowing a burst of `attempts` per `window_seconds`
pub fn create_unkeyed_rate_limiter(attempts: u32, window_seconds: u64) -> UnkeyedRateLimiter {
    let attempts = attempts.max(1);
    let window = Duration::from_secs(window_seconds.min(MAX_WINDOW_SECONDS));
    let period = (window / attempts).max(Duration::from_millis(1));
    let quota = Quota::with_period(period)
        .expect("Failed to create quota with valid period")
        .allow_burst(NonZeroU32::new(attempts).expect("attempts is guaranteed to be non-zero"));

    Arc::new(RateLimiter::direct(quota))
}

impl RateLimitConfig {
    pub fn build(&self) -> UnkeyedRateLimiter {
        create_unkeyed_rate_limiter(self.attempts, self.window_seconds)
    }
}

/// Consume one cell from `limiter`, mapping a refusal to `TooManyRequests`
/// with the number of whole seconds (at least one) until the next cell.
pub fn check_unkeyed(limiter: &UnkeyedRateLimiter, message: &str) -> Result<(), FormError> {
    match limiter.check() {
        Ok(_) => Ok(()),
        Err(negative) => {
            let wait_time = negative.wait_time_from(DefaultClock::default().now());
            let secs = wait_time.as_secs().max(1);
            Err(FormError::TooManyRequests(message.to_string(), Some(secs)))
        }
    }
}
