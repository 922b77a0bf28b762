use crate::{Result as WsErrorResult, WsError};

use place_core::PixelColor;

use std::panic::Location;

use axum::extract::ws::Message;
use error_location::ErrorLocation;

/// Liveness probe a client may send as a text frame
pub const PROBE_REQUEST: &str = "ping";

/// Fixed reply to [`PROBE_REQUEST`]
pub const PROBE_REPLY: &str = "pong";

/// Parse one inbound placement. Text and binary frames carry the same JSON.
#[track_caller]
pub fn decode_placement(payload: &[u8]) -> WsErrorResult<PixelColor> {
    serde_json::from_slice(payload).map_err(|e| WsError::InvalidMessage {
        message: format!("Undecodable placement: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Outbound frame for an accepted mutation
pub fn encode_placement(pixel: &PixelColor) -> WsErrorResult<Message> {
    let json = serde_json::to_string(pixel)?;
    Ok(Message::Text(json.into()))
}
