use crate::{
    AppState, BroadcastEvent, ConnectionRateLimiter, SlotTicket, WebSocketConnection,
    create_connection_span,
};

use place_core::PixelColor;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, warn};
use tokio::sync::mpsc;
use tracing::Instrument;

/// WebSocket upgrade handler.
///
/// The slot is claimed before upgrading so a full server answers with 503
/// instead of accepting and immediately dropping the socket.
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let (tx, rx) = mpsc::channel::<PixelColor>(state.config.send_buffer_size);

    let ticket = match state.slots.admit(tx) {
        Ok(ticket) => ticket,
        Err(e) => {
            warn!("Rejecting WebSocket upgrade: {e}");
            state.metrics.connection_rejected();
            return (StatusCode::SERVICE_UNAVAILABLE, "Server full").into_response();
        }
    };
    state.metrics.connection_established();

    let rate_limiter = state.rate_limiter_factory.create();
    let events = state.events.clone();

    ws.max_message_size(state.config.max_message_size)
        .on_failed_upgrade(move |e| {
            warn!(
                "WebSocket upgrade failed for connection {}: {e}",
                ticket.connection_id
            );
            tokio::spawn(async move {
                let _ = events.send(BroadcastEvent::Close(ticket)).await;
            });
        })
        .on_upgrade(move |socket| handle_socket(socket, ticket, rx, state, rate_limiter))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: WebSocket,
    ticket: SlotTicket,
    outbound: mpsc::Receiver<PixelColor>,
    state: AppState,
    rate_limiter: ConnectionRateLimiter,
) {
    let connection = WebSocketConnection::new(
        ticket,
        state.slots.clone(),
        state.canvas.clone(),
        state.events.clone(),
        rate_limiter,
        state.metrics.clone(),
    );

    let result = connection
        .handle(socket, outbound)
        .instrument(create_connection_span(ticket))
        .await;

    if let Err(e) = result {
        debug!("Connection {} ended: {}", ticket.connection_id, e.kind());
    }
}
