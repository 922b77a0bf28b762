use crate::message_codec::{PROBE_REPLY, PROBE_REQUEST, decode_placement, encode_placement};
use crate::{
    BroadcastEvent, ConnectionRateLimiter, Metrics, Result as WsErrorResult, SlotTable, SlotTicket,
    WsError,
};

use place_core::{Canvas, PixelColor};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Replies generated by ingress (probe answers) waiting for egress
const CONTROL_BUFFER_SIZE: usize = 8;

/// How long ingress waits for egress to flush and close after sending Close
const EGRESS_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// What ingress does after one frame
enum Flow {
    Continue,
    Stop,
}

/// Manages a single WebSocket connection.
///
/// Ingress runs on the calling task; egress is spawned and owns the write
/// half. Whatever ends the connection, ingress sends exactly one Close event
/// for its ticket. The slot (and with it the outbound queue) is only ever
/// freed by the broadcast loop.
pub struct WebSocketConnection {
    ticket: SlotTicket,
    slots: SlotTable,
    canvas: Arc<Canvas>,
    events: mpsc::Sender<BroadcastEvent>,
    rate_limiter: ConnectionRateLimiter,
    metrics: Metrics,
}

impl WebSocketConnection {
    pub fn new(
        ticket: SlotTicket,
        slots: SlotTable,
        canvas: Arc<Canvas>,
        events: mpsc::Sender<BroadcastEvent>,
        rate_limiter: ConnectionRateLimiter,
        metrics: Metrics,
    ) -> Self {
        Self {
            ticket,
            slots,
            canvas,
            events,
            rate_limiter,
            metrics,
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        mut self,
        socket: WebSocket,
        outbound: mpsc::Receiver<PixelColor>,
    ) -> WsErrorResult<()> {
        info!(
            "WebSocket connection {} established in slot {}",
            self.ticket.connection_id, self.ticket.index
        );

        let (ws_sender, mut ws_receiver) = socket.split();
        let (control_tx, control_rx) = mpsc::channel::<Message>(CONTROL_BUFFER_SIZE);

        let mut egress = tokio::spawn(run_egress(
            ws_sender,
            outbound,
            control_rx,
            self.metrics.clone(),
        ));
        let mut egress_finished = false;

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(msg)) => match self.handle_client_message(msg, &control_tx).await {
                            Ok(Flow::Continue) => {}
                            Ok(Flow::Stop) => break Ok(()),
                            Err(e) => break Err(e),
                        },
                        Some(Err(e)) => {
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {e}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            debug!("Connection {} closed by client", self.ticket.connection_id);
                            break Ok(());
                        }
                    }
                }

                _ = &mut egress, if !egress_finished => {
                    egress_finished = true;
                    debug!(
                        "Outbound side of connection {} finished",
                        self.ticket.connection_id
                    );
                    break Ok(());
                }
            }
        };

        if let Err(e) = &result {
            warn!("Connection {} terminated: {e}", self.ticket.connection_id);
            self.metrics.error_occurred(e.kind());
        }

        if self
            .events
            .send(BroadcastEvent::Close(self.ticket))
            .await
            .is_err()
        {
            error!(
                "Broadcast loop gone; slot {} cannot be released",
                self.ticket.index
            );
        }

        drop(control_tx);
        if !egress_finished && timeout(EGRESS_SHUTDOWN_TIMEOUT, &mut egress).await.is_err() {
            warn!(
                "Outbound side of connection {} did not stop in time, aborting",
                self.ticket.connection_id
            );
            egress.abort();
        }

        info!(
            "WebSocket connection {} closed (slot {})",
            self.ticket.connection_id, self.ticket.index
        );

        result
    }

    /// Handle a message from the client
    async fn handle_client_message(
        &mut self,
        msg: Message,
        control: &mpsc::Sender<Message>,
    ) -> WsErrorResult<Flow> {
        match msg {
            Message::Text(text) if text.as_str() == PROBE_REQUEST => {
                queue_control_reply(control, Message::Text(PROBE_REPLY.into()))?;
                Ok(Flow::Continue)
            }
            Message::Text(text) => self.handle_placement(text.as_bytes()).await,
            Message::Binary(data) => self.handle_placement(&data).await,
            // Pings are answered by the socket itself
            Message::Ping(_) | Message::Pong(_) => Ok(Flow::Continue),
            Message::Close(_) => {
                debug!(
                    "Received close frame from connection {}",
                    self.ticket.connection_id
                );
                Ok(Flow::Stop)
            }
        }
    }

    /// Decode, rate-limit, and apply one placement, queueing it for
    /// broadcast. Any rejection ends the connection.
    async fn handle_placement(&mut self, payload: &[u8]) -> WsErrorResult<Flow> {
        // An evicted client whose socket write is stalled may still be reading
        if !self.slots.is_occupied_by(self.ticket) {
            return Err(WsError::ConnectionClosed {
                reason: "slot was evicted".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let pixel = decode_placement(payload).inspect_err(|e| {
            self.metrics.pixel_rejected(e.kind());
        })?;

        if !self.rate_limiter.allow() {
            warn!(
                "Rate limit exceeded for connection {} (level {:.4})",
                self.ticket.connection_id,
                self.rate_limiter.level()
            );
            self.metrics.pixel_rejected("rate_limited");
            return Err(WsError::RateLimited {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Reserve first so the enqueue below cannot wait while the canvas is locked
        let permit = self
            .events
            .reserve()
            .await
            .map_err(|_| WsError::BroadcastClosed {
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Enqueue under the canvas write lock: broadcast order equals write order
        let applied = self.canvas.apply_then(pixel.x, pixel.y, pixel.color, || {
            permit.send(BroadcastEvent::Mutation(pixel))
        });

        if !applied {
            let (width, height) = self.canvas.bounds();
            self.metrics.pixel_rejected("out_of_bounds");
            return Err(WsError::OutOfBounds {
                x: pixel.x,
                y: pixel.y,
                width,
                height,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("Connection {} placed {pixel}", self.ticket.connection_id);
        self.metrics.pixel_accepted();

        Ok(Flow::Continue)
    }
}

/// Queue a reply for egress without waiting. A full queue means the client
/// is not reading, so the connection ends.
pub(crate) fn queue_control_reply(
    control: &mpsc::Sender<Message>,
    reply: Message,
) -> WsErrorResult<()> {
    control.try_send(reply).map_err(|e| {
        let reason = match e {
            mpsc::error::TrySendError::Full(_) => "reply queue full",
            mpsc::error::TrySendError::Closed(_) => "outbound side closed",
        };
        WsError::ConnectionClosed {
            reason: reason.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}

/// Drain the outbound queue (and probe replies) onto the socket. Ends when
/// the broadcast loop drops the queue's sender or a write fails, closing the
/// socket either way.
async fn run_egress(
    mut ws_sender: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<PixelColor>,
    mut control: mpsc::Receiver<Message>,
    metrics: Metrics,
) {
    let mut control_open = true;

    loop {
        let message = tokio::select! {
            pixel = outbound.recv() => match pixel {
                Some(pixel) => match encode_placement(&pixel) {
                    Ok(message) => message,
                    Err(e) => {
                        error!("Failed to encode {pixel}: {e}");
                        continue;
                    }
                },
                None => break,
            },
            reply = control.recv(), if control_open => match reply {
                Some(reply) => reply,
                None => {
                    control_open = false;
                    continue;
                }
            },
        };

        if let Err(e) = ws_sender.send(message).await {
            debug!("Write failed, stopping outbound side: {e}");
            break;
        }
        metrics.message_sent();
    }

    let _ = ws_sender.close().await;
}
