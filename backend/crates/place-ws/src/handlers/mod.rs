pub mod snapshot;
pub mod socket;
pub mod stat;

use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Anything the engine does not serve
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
