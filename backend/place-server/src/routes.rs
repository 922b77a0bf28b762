use place_config::ServerConfig;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Mount the engine under `base_path` (or at the root) and serve static files everywhere else
pub fn build_router(place_routes: Router, config: &ServerConfig) -> Router {
    // nest("/") panics, so a root mount merges and lets ServeDir replace the engine fallback
    let router = if config.mounts_at_root() {
        Router::new().merge(place_routes)
    } else {
        Router::new().nest(&config.base_path, place_routes)
    };

    router
        .fallback_service(ServeDir::new(&config.static_root))
        // CORS middleware (the canvas is readable from any origin)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
