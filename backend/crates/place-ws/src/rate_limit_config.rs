use std::time::Duration;

/// Configuration for per-connection rate limiting
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Sustained placements per second
    pub messages_per_sec: u32,
    /// Smallest gap credited between two placements
    pub min_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            messages_per_sec: 20,
            min_interval: Duration::from_millis(5),
        }
    }
}
