/// Configuration for WebSocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound queue capacity per slot. Bounded so a stalled client is
    /// detected (and evicted) instead of buffering without limit.
    pub send_buffer_size: usize,
    /// Largest inbound frame accepted, in bytes
    pub max_message_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 64,
            max_message_size: 1024,
        }
    }
}
