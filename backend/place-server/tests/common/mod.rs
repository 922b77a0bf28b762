#![allow(dead_code)]

use place_config::ServerConfig;
use place_core::{Canvas, Color};
use place_server::build_router;
use place_ws::{Place, PlaceOptions};

use axum_test::TestServer;
use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!doctype html><title>place</title>";

/// Full host router over a temp static root
pub struct TestHost {
    pub server: TestServer,
    pub place: Place,
    pub static_root: TempDir,
}

pub fn create_test_host() -> TestHost {
    create_test_host_with_config(ServerConfig::default())
}

/// Host with the engine mounted at the root
pub fn create_root_test_host() -> TestHost {
    create_test_host_with_config(ServerConfig {
        base_path: String::from("/"),
        ..Default::default()
    })
}

fn create_test_host_with_config(config: ServerConfig) -> TestHost {
    let static_root = TempDir::new().expect("temp dir");
    std::fs::write(static_root.path().join("index.html"), INDEX_HTML).expect("write index");

    let config = ServerConfig {
        static_root: static_root.path().display().to_string(),
        ..config
    };

    let canvas = Canvas::filled(4, 4, Color::WHITE).expect("valid canvas");
    let place = Place::new(
        canvas,
        PlaceOptions {
            max_connections: 2,
            ..Default::default()
        },
    );

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(place.router(), &config))
        .expect("Failed to create test server");

    TestHost {
        server,
        place,
        static_root,
    }
}
