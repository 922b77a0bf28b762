use crate::{
    AppState, BroadcastConfig, BroadcastLoop, ConnectionConfig, Metrics, RateLimitConfig,
    RateLimiterFactory, SlotTable, handlers,
};

use place_core::Canvas;

use std::sync::Arc;

use axum::{Router, routing::get};
use bytes::Bytes;
use log::info;
use tokio::task::JoinHandle;

/// Construction-time settings for [`Place`]
#[derive(Debug, Clone)]
pub struct PlaceOptions {
    pub max_connections: usize,
    pub connection: ConnectionConfig,
    pub broadcast: BroadcastConfig,
    pub rate_limit: RateLimitConfig,
}

impl Default for PlaceOptions {
    fn default() -> Self {
        Self {
            max_connections: 64,
            connection: ConnectionConfig::default(),
            broadcast: BroadcastConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// The broadcast engine: canvas, slot table, and the running broadcast loop.
///
/// Must be created inside a tokio runtime. The host mounts [`Place::router`]
/// and persists [`Place::encoded_snapshot`] on its own schedule.
pub struct Place {
    state: AppState,
    broadcast: JoinHandle<()>,
}

impl Place {
    pub fn new(canvas: Canvas, options: PlaceOptions) -> Self {
        let metrics = Metrics::default();
        let slots = SlotTable::new(options.max_connections);
        let (events, broadcast) =
            BroadcastLoop::spawn(slots.clone(), &options.broadcast, metrics.clone());

        let (width, height) = canvas.bounds();
        info!(
            "Place engine ready: {width}x{height} canvas, {} slots",
            options.max_connections
        );

        let state = AppState {
            canvas: Arc::new(canvas),
            slots,
            events,
            rate_limiter_factory: RateLimiterFactory::new(options.rate_limit),
            metrics,
            config: options.connection,
        };

        Self { state, broadcast }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn encoded_snapshot(&self) -> Bytes {
        self.state.canvas.encoded_snapshot()
    }

    pub fn occupant_count(&self) -> usize {
        self.state.slots.occupant_count()
    }

    pub fn capacity(&self) -> usize {
        self.state.slots.capacity()
    }

    pub fn canvas(&self) -> &Arc<Canvas> {
        &self.state.canvas
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Drop for Place {
    fn drop(&mut self) {
        self.broadcast.abort();
    }
}

/// Engine routes relative to wherever the host mounts them
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/place.png", get(handlers::snapshot::handler))
        .route("/stat", get(handlers::stat::handler))
        .route("/ws", get(handlers::socket::handler))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .with_state(state)
}
