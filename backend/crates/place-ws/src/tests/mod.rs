mod message_codec;
mod web_socket_connection;

use place_core::{Color, PixelColor};

pub(crate) fn black_pixel(x: i64, y: i64) -> PixelColor {
    PixelColor::new(x, y, Color::BLACK)
}
