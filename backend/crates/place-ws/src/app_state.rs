use crate::{BroadcastEvent, ConnectionConfig, Metrics, RateLimiterFactory, SlotTable};

use place_core::Canvas;

use std::sync::Arc;

use tokio::sync::mpsc;

/// Shared application state for the place handlers
#[derive(Clone)]
pub struct AppState {
    pub canvas: Arc<Canvas>,
    pub slots: SlotTable,
    pub events: mpsc::Sender<BroadcastEvent>,
    pub rate_limiter_factory: RateLimiterFactory,
    pub metrics: Metrics,
    pub config: ConnectionConfig,
}
