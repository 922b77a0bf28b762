use crate::{BroadcastConfig, BroadcastEvent, Metrics, SlotTable};
use crate::slot_table::Eviction;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The single task that frees slots and relays mutations.
///
/// Events are handled strictly one at a time in arrival order, so every
/// subscriber sees accepted mutations in the same order. Fan-out never waits:
/// a subscriber whose queue cannot take a mutation is evicted.
pub struct BroadcastLoop {
    slots: SlotTable,
    metrics: Metrics,
}

impl BroadcastLoop {
    pub fn new(slots: SlotTable, metrics: Metrics) -> Self {
        Self { slots, metrics }
    }

    /// Start the loop on the runtime. It runs until every event sender is
    /// dropped.
    pub fn spawn(
        slots: SlotTable,
        config: &BroadcastConfig,
        metrics: Metrics,
    ) -> (mpsc::Sender<BroadcastEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.event_buffer_size);
        let handle = tokio::spawn(Self::new(slots, metrics).run(rx));
        (tx, handle)
    }

    pub async fn run(self, mut events: mpsc::Receiver<BroadcastEvent>) {
        info!("Broadcast loop started ({} slots)", self.slots.capacity());

        while let Some(event) = events.recv().await {
            self.handle(event);
        }

        info!("Broadcast loop stopped: all event senders dropped");
    }

    pub fn handle(&self, event: BroadcastEvent) {
        match event {
            BroadcastEvent::Close(ticket) => {
                if self.slots.release(ticket) {
                    debug!(
                        "Released slot {} held by connection {}",
                        ticket.index, ticket.connection_id
                    );
                    self.metrics.connection_closed("disconnected");
                } else {
                    debug!(
                        "Ignoring close for slot {}: connection {} no longer holds it",
                        ticket.index, ticket.connection_id
                    );
                }
            }
            BroadcastEvent::Mutation(pixel) => {
                let report = self.slots.fan_out(pixel);

                for (ticket, eviction) in &report.evicted {
                    let reason = match eviction {
                        Eviction::QueueFull => "queue_full",
                        Eviction::QueueClosed => "queue_closed",
                    };
                    warn!(
                        "Evicted connection {} from slot {} ({reason})",
                        ticket.connection_id, ticket.index
                    );
                    self.metrics.slot_evicted(reason);
                    self.metrics.connection_closed("evicted");
                }

                debug!("Relayed {pixel} to {} subscribers", report.delivered);
                self.metrics.broadcast_published(report.delivered);
            }
        }
    }
}
