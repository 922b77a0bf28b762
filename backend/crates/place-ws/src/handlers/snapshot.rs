use crate::AppState;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use log::error;

/// GET the canvas as PNG. Encoding runs on the blocking pool.
pub async fn handler(State(state): State<AppState>) -> Response {
    let canvas = state.canvas.clone();
    let bytes = match tokio::task::spawn_blocking(move || canvas.encoded_snapshot()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Snapshot encoding task failed: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if bytes.is_empty() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Snapshot unavailable").into_response();
    }

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_LENGTH, HeaderValue::from(bytes.len())),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ),
        ],
        bytes,
    )
        .into_response()
}
