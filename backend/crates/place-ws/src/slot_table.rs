use crate::{ConnectionId, Result as WsErrorResult, WsError};

use place_core::PixelColor;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Handle for one occupied slot. Carried by close events so a stale close
/// can never free a slot that has since been handed to someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotTicket {
    pub index: usize,
    pub connection_id: ConnectionId,
}

/// Why the broadcast loop dropped a slot during fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    /// Outbound queue was full: the client is not keeping up
    QueueFull,
    /// Receiving side is gone
    QueueClosed,
}

/// Outcome of relaying one mutation
#[derive(Debug, Default)]
pub struct FanOut {
    pub delivered: usize,
    pub evicted: Vec<(SlotTicket, Eviction)>,
}

/// Fixed-capacity table of live subscribers.
///
/// Each slot holds the only sender of its connection's outbound queue, so
/// emptying a slot closes that queue. Admission happens on request tasks;
/// everything that empties a slot is crate-private and only driven by the
/// broadcast loop.
#[derive(Clone)]
pub struct SlotTable {
    inner: Arc<Mutex<SlotTableInner>>,
    capacity: usize,
}

struct SlotTableInner {
    slots: Vec<Option<Slot>>,
    occupied: usize,
}

struct Slot {
    connection_id: ConnectionId,
    sender: mpsc::Sender<PixelColor>,
}

impl SlotTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotTableInner {
                slots: (0..capacity).map(|_| None).collect(),
                occupied: 0,
            })),
            capacity,
        }
    }

    /// Claim the first free slot and install `sender` as its outbound queue.
    /// The slot is published fully initialized or not at all.
    #[track_caller]
    pub fn admit(&self, sender: mpsc::Sender<PixelColor>) -> WsErrorResult<SlotTicket> {
        let mut inner = self.inner.lock();

        let Some(index) = inner.slots.iter().position(Option::is_none) else {
            warn!("Server full: {}/{} slots occupied", inner.occupied, self.capacity);
            return Err(WsError::ServerFull {
                capacity: self.capacity,
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let connection_id = ConnectionId::new();
        inner.slots[index] = Some(Slot {
            connection_id,
            sender,
        });
        inner.occupied += 1;

        info!(
            "Admitted connection {connection_id} into slot {index} ({}/{} occupied)",
            inner.occupied, self.capacity
        );

        Ok(SlotTicket {
            index,
            connection_id,
        })
    }

    pub fn occupant_count(&self) -> usize {
        self.inner.lock().occupied
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_occupied_by(&self, ticket: SlotTicket) -> bool {
        let inner = self.inner.lock();
        matches!(
            inner.slots.get(ticket.index),
            Some(Some(slot)) if slot.connection_id == ticket.connection_id
        )
    }

    /// Empty the slot if `ticket` still owns it. Returns whether anything was
    /// freed.
    pub(crate) fn release(&self, ticket: SlotTicket) -> bool {
        let mut inner = self.inner.lock();

        let owned = matches!(
            inner.slots.get(ticket.index),
            Some(Some(slot)) if slot.connection_id == ticket.connection_id
        );
        if owned {
            inner.slots[ticket.index] = None;
            inner.occupied -= 1;
        }

        owned
    }

    /// Offer `pixel` to every occupied slot without waiting. Slots that cannot
    /// take it right now are emptied.
    pub(crate) fn fan_out(&self, pixel: PixelColor) -> FanOut {
        let mut inner = self.inner.lock();
        let mut report = FanOut::default();

        for (index, entry) in inner.slots.iter_mut().enumerate() {
            let Some(slot) = entry else {
                continue;
            };

            let eviction = match slot.sender.try_send(pixel) {
                Ok(()) => {
                    report.delivered += 1;
                    continue;
                }
                Err(TrySendError::Full(_)) => Eviction::QueueFull,
                Err(TrySendError::Closed(_)) => Eviction::QueueClosed,
            };

            report.evicted.push((
                SlotTicket {
                    index,
                    connection_id: slot.connection_id,
                },
                eviction,
            ));
            *entry = None;
        }

        inner.occupied -= report.evicted.len();
        report
    }
}
