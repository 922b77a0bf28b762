#![allow(dead_code)]

use place_core::PixelColor;

use std::time::Duration;

use axum_test::{TestServer, TestWebSocket};
use tokio::time::timeout;

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect to the WebSocket endpoint
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server.get_websocket("/ws").await.into_websocket().await;
        Self { ws }
    }

    /// Send a placement as a JSON text frame
    pub async fn place(&mut self, pixel: &PixelColor) {
        self.ws.send_json(pixel).await;
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Receive the next broadcast mutation
    pub async fn receive_pixel(&mut self) -> PixelColor {
        timeout(RECEIVE_TIMEOUT, self.ws.receive_json::<PixelColor>())
            .await
            .expect("Timed out waiting for a broadcast")
    }

    /// Receive text message
    pub async fn receive_text(&mut self) -> String {
        timeout(RECEIVE_TIMEOUT, self.ws.receive_text())
            .await
            .expect("Timed out waiting for a text frame")
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Connect several clients at once (helper for broadcast tests)
pub async fn connect_clients(server: &TestServer, count: usize) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(WsTestClient::connect(server).await);
    }
    clients
}
