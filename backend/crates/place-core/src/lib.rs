pub mod canvas;
pub mod error;
pub mod models;

pub use canvas::Canvas;
pub use error::{CoreError, CoreResult};
pub use models::color::Color;
pub use models::pixel_color::PixelColor;

#[cfg(test)]
mod tests;
