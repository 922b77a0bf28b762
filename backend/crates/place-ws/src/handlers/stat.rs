use crate::AppState;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

/// Occupancy readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatResponse {
    pub connections: usize,
    pub capacity: usize,
}

pub async fn handler(State(state): State<AppState>) -> Json<StatResponse> {
    Json(StatResponse {
        connections: state.slots.occupant_count(),
        capacity: state.slots.capacity(),
    })
}
