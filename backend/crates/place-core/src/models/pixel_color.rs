use crate::Color;

use serde::{Deserialize, Serialize};

/// A single pixel mutation: an inbound placement request and, once accepted,
/// the outbound notification relayed to every subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelColor {
    pub x: i64,
    pub y: i64,
    pub color: Color,
}

impl PixelColor {
    pub fn new(x: i64, y: i64, color: Color) -> Self {
        Self { x, y, color }
    }
}

impl std::fmt::Display for PixelColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.color)
    }
}
