pub mod app_state;
pub mod broadcast_config;
pub mod broadcast_event;
pub mod broadcast_loop;
pub mod connection_config;
pub mod connection_id;
pub mod connection_rate_limiter;
pub mod error;
pub mod handlers;
pub mod message_codec;
pub mod metrics;
pub mod place;
pub mod rate_limit_config;
pub mod rate_limiter_factory;
pub mod slot_table;
pub mod web_socket_connection;

pub use app_state::AppState;
pub use broadcast_config::BroadcastConfig;
pub use broadcast_event::BroadcastEvent;
pub use broadcast_loop::BroadcastLoop;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_rate_limiter::ConnectionRateLimiter;
pub use error::{Result, WsError};
pub use handlers::stat::StatResponse;
pub use message_codec::{PROBE_REPLY, PROBE_REQUEST};
pub use metrics::Metrics;
pub use place::{Place, PlaceOptions, build_router};
pub use rate_limit_config::RateLimitConfig;
pub use rate_limiter_factory::RateLimiterFactory;
pub use slot_table::{SlotTable, SlotTicket};
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one WebSocket connection.
///
/// The fields reach `tracing` subscribers only. Lines written through `log`
/// are not enriched, so connection log messages name the connection id in
/// their own text.
pub fn create_connection_span(ticket: SlotTicket) -> tracing::Span {
    info_span!(
        "ws_connection",
        slot = ticket.index,
        connection_id = %ticket.connection_id,
    )
}
