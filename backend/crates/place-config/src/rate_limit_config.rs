use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Sustained message rate constraints
pub const MIN_MESSAGES_PER_SEC: u32 = 1;
pub const MAX_MESSAGES_PER_SEC: u32 = 500;
pub const DEFAULT_MESSAGES_PER_SEC: u32 = 20;

// Floor applied to the gap between two messages
pub const MIN_MIN_INTERVAL_MS: u64 = 1;
pub const MAX_MIN_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 5;

/// Rate limiting settings.
/// Applied per-connection to pixel placements.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Sustained placements per second a connection may keep up
    pub messages_per_sec: u32,
    /// Smallest gap credited between two placements, in milliseconds
    pub min_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            messages_per_sec: DEFAULT_MESSAGES_PER_SEC,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.messages_per_sec < MIN_MESSAGES_PER_SEC
            || self.messages_per_sec > MAX_MESSAGES_PER_SEC
        {
            return Err(ConfigError::config(format!(
                "rate_limit.messages_per_sec must be {}-{}, got {}",
                MIN_MESSAGES_PER_SEC, MAX_MESSAGES_PER_SEC, self.messages_per_sec
            )));
        }

        if self.min_interval_ms < MIN_MIN_INTERVAL_MS || self.min_interval_ms > MAX_MIN_INTERVAL_MS
        {
            return Err(ConfigError::config(format!(
                "rate_limit.min_interval_ms must be {}-{}, got {}",
                MIN_MIN_INTERVAL_MS, MAX_MIN_INTERVAL_MS, self.min_interval_ms
            )));
        }

        // At or above the sustained interval every burst counts as on-pace
        let sustained_interval_ms = 1000 / u64::from(self.messages_per_sec);
        if self.min_interval_ms >= sustained_interval_ms {
            return Err(ConfigError::config(format!(
                "rate_limit.min_interval_ms ({}) must be below 1000 / messages_per_sec ({})",
                self.min_interval_ms, sustained_interval_ms
            )));
        }

        Ok(())
    }
}
