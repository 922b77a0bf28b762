use metrics::{counter, gauge};

/// Metrics collector for the place engine
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "place_ws" }
    }

    /// Record a connection admitted into a slot
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record an upgrade refused because every slot was taken
    pub fn connection_rejected(&self) {
        counter!(format!("{}.connections.rejected", self.prefix)).increment(1);
    }

    /// Record a slot freed, labelled with why
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record a placement applied to the canvas
    pub fn pixel_accepted(&self) {
        counter!(format!("{}.pixels.accepted", self.prefix)).increment(1);
    }

    /// Record a placement refused, labelled with the error kind
    pub fn pixel_rejected(&self, reason: &str) {
        counter!(format!("{}.pixels.rejected", self.prefix)).increment(1);
        counter!(format!("{}.pixels.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Record one mutation relayed by the broadcast loop
    pub fn broadcast_published(&self, subscriber_count: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.subscribers", self.prefix)).set(subscriber_count as f64);
    }

    /// Record a slot dropped during fan-out
    pub fn slot_evicted(&self, reason: &str) {
        counter!(format!("{}.slots.evicted", self.prefix)).increment(1);
        counter!(format!("{}.slots.evicted.{}", self.prefix, reason)).increment(1);
    }

    /// Record a frame written to a client
    pub fn message_sent(&self) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
