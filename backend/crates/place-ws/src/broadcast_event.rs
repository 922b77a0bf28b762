use crate::SlotTicket;

use place_core::PixelColor;

/// Input to the broadcast loop. Processed one at a time, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastEvent {
    /// The connection holding this slot has ended
    Close(SlotTicket),
    /// An accepted mutation to relay to every subscriber
    Mutation(PixelColor),
}
