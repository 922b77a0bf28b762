use crate::tests::{decode_snapshot, pixel_at};
use crate::{Canvas, Color, CoreError};

use std::sync::Arc;

use image::RgbaImage;

// =========================================================================
// Construction
// =========================================================================

#[test]
fn given_zero_width_when_filled_then_empty_canvas_error() {
    let result = Canvas::filled(0, 4, Color::WHITE);

    assert!(matches!(result, Err(CoreError::EmptyCanvas { .. })));
}

#[test]
fn given_garbage_bytes_when_from_png_then_decode_error() {
    let result = Canvas::from_png(b"definitely not a png");

    assert!(matches!(result, Err(CoreError::ImageDecode { .. })));
}

#[test]
fn given_encoded_canvas_when_from_png_then_pixels_preserved() {
    let original = Canvas::filled(3, 2, Color::WHITE).unwrap();
    original.apply(2, 1, Color::new(10, 20, 30, 40));

    let reloaded = Canvas::from_png(&original.encoded_snapshot()).unwrap();

    assert_eq!(reloaded.bounds(), (3, 2));
    assert_eq!(reloaded.pixel(2, 1), Some(Color::new(10, 20, 30, 40)));
    assert_eq!(reloaded.pixel(0, 0), Some(Color::WHITE));
}

// =========================================================================
// apply
// =========================================================================

#[test]
fn given_white_canvas_when_apply_in_bounds_then_snapshot_shows_pixel() {
    // Given
    let canvas = Canvas::filled(4, 4, Color::WHITE).unwrap();

    // When
    let accepted = canvas.apply(1, 2, Color::BLACK);

    // Then
    assert!(accepted);
    let image = decode_snapshot(&canvas.encoded_snapshot());
    assert_eq!(image.dimensions(), (4, 4));
    for y in 0..4 {
        for x in 0..4 {
            let expected = if (x, y) == (1, 2) {
                Color::BLACK
            } else {
                Color::WHITE
            };
            assert_eq!(pixel_at(&image, x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn given_canvas_when_apply_out_of_bounds_then_rejected_and_unchanged() {
    let canvas = Canvas::filled(4, 4, Color::WHITE).unwrap();
    let before = canvas.encoded_snapshot();

    for (x, y) in [(9, 0), (4, 0), (0, 4), (-1, 0), (0, -1), (i64::MAX, 0)] {
        assert!(!canvas.apply(x, y, Color::BLACK), "({x}, {y}) accepted");
    }

    assert_eq!(canvas.version(), 0);
    assert_eq!(canvas.encoded_snapshot(), before);
}

#[test]
fn given_same_pixel_written_twice_when_snapshot_then_last_writer_wins() {
    let canvas = Canvas::filled(2, 2, Color::WHITE).unwrap();

    canvas.apply(0, 0, Color::new(255, 0, 0, 255));
    canvas.apply(0, 0, Color::new(0, 0, 255, 255));

    assert_eq!(canvas.pixel(0, 0), Some(Color::new(0, 0, 255, 255)));
}

#[test]
fn given_out_of_bounds_position_when_apply_then_callback_not_run() {
    let canvas = Canvas::filled(2, 2, Color::WHITE).unwrap();
    let mut ran = false;

    assert!(!canvas.apply_then(5, 0, Color::BLACK, || ran = true));

    assert!(!ran);
}

#[test]
fn given_concurrent_writers_on_one_pixel_when_publishing_then_last_published_matches_canvas() {
    let canvas = Arc::new(Canvas::filled(2, 2, Color::WHITE).unwrap());
    let published = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let writers: Vec<_> = (0..4u8)
        .map(|writer| {
            let canvas = Arc::clone(&canvas);
            let published = Arc::clone(&published);
            std::thread::spawn(move || {
                for i in 0..200u8 {
                    let color = Color::new(writer, i, 0, 255);
                    assert!(canvas.apply_then(1, 1, color, || published.lock().push(color)));
                }
            })
        })
        .collect();

    for handle in writers {
        handle.join().unwrap();
    }

    let published = published.lock();
    assert_eq!(published.len(), 800);
    assert_eq!(canvas.pixel(1, 1), published.last().copied());
}

#[test]
fn given_out_of_bounds_position_when_pixel_then_none() {
    let canvas = Canvas::filled(2, 2, Color::WHITE).unwrap();

    assert_eq!(canvas.pixel(2, 0), None);
    assert_eq!(canvas.pixel(-1, 1), None);
}

// =========================================================================
// Snapshot cache
// =========================================================================

#[test]
fn given_unchanged_canvas_when_snapshot_twice_then_same_buffer_returned() {
    let canvas = Canvas::filled(8, 8, Color::WHITE).unwrap();

    let first = canvas.encoded_snapshot();
    let second = canvas.encoded_snapshot();

    // Cache hit hands out the same shared allocation
    assert_eq!(first.as_ptr(), second.as_ptr());
}

#[test]
fn given_cached_snapshot_when_apply_then_next_snapshot_reencoded() {
    let canvas = Canvas::filled(8, 8, Color::WHITE).unwrap();
    let stale = canvas.encoded_snapshot();

    canvas.apply(3, 3, Color::BLACK);
    let fresh = canvas.encoded_snapshot();

    assert_ne!(stale, fresh);
    assert_eq!(pixel_at(&decode_snapshot(&fresh), 3, 3), Color::BLACK);
}

#[test]
fn given_concurrent_writers_and_readers_when_done_then_final_snapshot_has_every_write() {
    let canvas = Arc::new(Canvas::filled(16, 16, Color::WHITE).unwrap());

    let writers: Vec<_> = (0..4)
        .map(|row| {
            let canvas = Arc::clone(&canvas);
            std::thread::spawn(move || {
                for x in 0..16 {
                    assert!(canvas.apply(x, row, Color::BLACK));
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..2)
        .map(|_| {
            let canvas = Arc::clone(&canvas);
            std::thread::spawn(move || {
                for _ in 0..8 {
                    let image = decode_snapshot(&canvas.encoded_snapshot());
                    assert_eq!(image.dimensions(), (16, 16));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let image: RgbaImage = decode_snapshot(&canvas.encoded_snapshot());
    for row in 0..4 {
        for x in 0..16 {
            assert_eq!(pixel_at(&image, x, row), Color::BLACK);
        }
    }
    assert_eq!(pixel_at(&image, 0, 4), Color::WHITE);
}
