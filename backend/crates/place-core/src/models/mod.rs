pub mod color;
pub mod pixel_color;
