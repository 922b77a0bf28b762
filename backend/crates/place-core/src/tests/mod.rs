mod canvas;

use crate::Color;

use image::RgbaImage;

/// Decode snapshot bytes back into pixels for assertions
pub(crate) fn decode_snapshot(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .expect("snapshot should be a valid PNG")
        .to_rgba8()
}

pub(crate) fn pixel_at(image: &RgbaImage, x: u32, y: u32) -> Color {
    Color::from(*image.get_pixel(x, y))
}
