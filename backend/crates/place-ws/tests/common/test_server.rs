#![allow(dead_code)]

use place_core::{Canvas, Color, PixelColor};
use place_ws::{ConnectionConfig, Place, PlaceOptions, RateLimitConfig, StatResponse};

use std::time::Duration;

use axum_test::TestServer;
use image::RgbaImage;
use tokio::time::sleep;

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub width: u32,
    pub height: u32,
    pub max_connections: usize,
    pub messages_per_sec: u32,
    pub min_interval: Duration,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            max_connections: 8,
            // Effectively unlimited so tests can send back-to-back
            messages_per_sec: 100_000,
            min_interval: Duration::from_millis(1),
        }
    }
}

impl TestServerConfig {
    /// Create config with a small slot table (for limit tests)
    pub fn with_capacity(max_connections: usize) -> Self {
        Self {
            max_connections,
            ..Default::default()
        }
    }

    /// Create config with the production rate limit (for rate limit tests)
    pub fn with_strict_rate_limits() -> Self {
        let defaults = RateLimitConfig::default();
        Self {
            messages_per_sec: defaults.messages_per_sec,
            min_interval: defaults.min_interval,
            ..Default::default()
        }
    }
}

/// Test server with access to the engine for assertions
pub struct TestServerWithPlace {
    pub server: TestServer,
    pub place: Place,
}

/// Create a TestServer with default configuration
pub fn create_test_server() -> TestServerWithPlace {
    create_test_server_with_config(TestServerConfig::default())
}

/// Create a TestServer with custom configuration
pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithPlace {
    let canvas =
        Canvas::filled(config.width, config.height, Color::WHITE).expect("valid canvas size");

    let place = Place::new(
        canvas,
        PlaceOptions {
            max_connections: config.max_connections,
            connection: ConnectionConfig::default(),
            rate_limit: RateLimitConfig {
                messages_per_sec: config.messages_per_sec,
                min_interval: config.min_interval,
            },
            ..Default::default()
        },
    );

    let server = TestServer::builder()
        .http_transport()
        .build(place.router())
        .expect("Failed to create test server");

    TestServerWithPlace { server, place }
}

/// Fetch `/stat`
pub async fn fetch_stat(server: &TestServer) -> StatResponse {
    server.get("/stat").await.json::<StatResponse>()
}

/// Fetch `/place.png` and decode it
pub async fn fetch_snapshot(server: &TestServer) -> RgbaImage {
    let response = server.get("/place.png").await;
    image::load_from_memory_with_format(response.as_bytes(), image::ImageFormat::Png)
        .expect("snapshot should be a valid PNG")
        .to_rgba8()
}

/// Poll `/stat` until the occupant count matches, failing after ~2s
pub async fn wait_for_connections(server: &TestServer, expected: usize) {
    let mut last = None;
    for _ in 0..100 {
        let stat = fetch_stat(server).await;
        if stat.connections == expected {
            return;
        }
        last = Some(stat.connections);
        sleep(Duration::from_millis(20)).await;
    }
    panic!("connections stayed at {last:?}, expected {expected}");
}

pub fn pixel(x: i64, y: i64, color: Color) -> PixelColor {
    PixelColor::new(x, y, color)
}
