use crate::RateLimitConfig;

use std::time::Duration;

use governor::clock::{Clock, DefaultClock, Reference};

/// `allow()` admits a message while the level stays above this
pub const LEVEL_THRESHOLD: f64 = 0.01;

/// Lowest level the bucket can sink to, so an idle gap can always bring it back
const LEVEL_FLOOR: f64 = 1e-6;

/// Per-connection leaky-bucket filter.
///
/// Each call scales the level by `rate * dt`, where `dt` is the time since the
/// previous call (never less than `min_interval`). Messages arriving on pace
/// keep the level near 1.0, bursts drive it towards zero, and idle time
/// restores it. Short bursts pass; sustained flooding does not.
pub struct ConnectionRateLimiter<C: Clock = DefaultClock> {
    clock: C,
    last: C::Instant,
    level: f64,
    rate: f64,
    min_interval: Duration,
}

impl ConnectionRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, DefaultClock::default())
    }
}

impl<C: Clock> ConnectionRateLimiter<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        let last = clock.now();
        Self {
            clock,
            last,
            level: 1.0,
            rate: f64::from(config.messages_per_sec),
            min_interval: config.min_interval,
        }
    }

    /// Record one message and report whether it may proceed.
    pub fn allow(&mut self) -> bool {
        let now = self.clock.now();
        let elapsed = Duration::from(now.duration_since(self.last)).max(self.min_interval);
        self.last = now;

        self.level = (self.level * self.rate * elapsed.as_secs_f64()).clamp(LEVEL_FLOOR, 1.0);
        self.level > LEVEL_THRESHOLD
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}
