/// Configuration for the broadcast loop
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Capacity of the event queue shared by every ingress loop
    pub event_buffer_size: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
        }
    }
}
