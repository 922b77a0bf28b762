
use std::path::Path;

use place_core::{Canvas, Color};

/// Write a `width` x `height` PNG filled with `color`
pub(crate) fn write_png(path: &Path, width: u32, height: u32, color: Color) {
    let canvas = Canvas::filled(width, height, color).expect("valid canvas size");
    std::fs::write(path, canvas.encoded_snapshot()).expect("write test PNG");
}
