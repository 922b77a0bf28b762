use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Per-connection outbound queue constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 64;

// Broadcast event queue constraints
pub const MIN_EVENT_BUFFER_SIZE: usize = 1;
pub const MAX_EVENT_BUFFER_SIZE: usize = 100_000;
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 256;

/// WebSocket connection settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Outbound queue capacity per connection slot. A slot whose queue is
    /// full at broadcast time is disconnected.
    pub send_buffer_size: usize,
    /// Capacity of the queue feeding the broadcast loop
    pub event_buffer_size: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

impl WebSocketConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "websocket.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if self.event_buffer_size < MIN_EVENT_BUFFER_SIZE
            || self.event_buffer_size > MAX_EVENT_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "websocket.event_buffer_size must be {}-{}, got {}",
                MIN_EVENT_BUFFER_SIZE, MAX_EVENT_BUFFER_SIZE, self.event_buffer_size
            )));
        }

        Ok(())
    }
}
