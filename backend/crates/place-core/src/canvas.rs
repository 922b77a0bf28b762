use crate::{Color, CoreError, CoreResult};

use std::io::Cursor;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use error_location::ErrorLocation;
use image::{ImageFormat, RgbaImage};
use log::{debug, error};
use parking_lot::{Mutex, RwLock};

/// The shared bitmap.
///
/// Pixel writes go through [`Canvas::apply`] only. Every accepted write bumps
/// `version`, which invalidates the cached PNG encoding; the next call to
/// [`Canvas::encoded_snapshot`] re-encodes. Concurrent readers may race to
/// re-encode, and any of their results is a valid cache entry: an encoding is
/// only installed when nothing newer is cached.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: RwLock<RgbaImage>,
    version: AtomicU64,
    snapshot: Mutex<Option<EncodedSnapshot>>,
}

struct EncodedSnapshot {
    version: u64,
    bytes: Bytes,
}

impl Canvas {
    #[track_caller]
    pub fn new(image: RgbaImage) -> CoreResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyCanvas {
                width,
                height,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: RwLock::new(image),
            version: AtomicU64::new(0),
            snapshot: Mutex::new(None),
        })
    }

    /// A `width` x `height` canvas with every pixel set to `color`.
    #[track_caller]
    pub fn filled(width: u32, height: u32, color: Color) -> CoreResult<Self> {
        Self::new(RgbaImage::from_pixel(width, height, color.into()))
    }

    /// Decode a PNG into straight RGBA8. Palettes and other color types are
    /// flattened so every pixel can be written back with any color.
    #[track_caller]
    pub fn from_png(data: &[u8]) -> CoreResult<Self> {
        let decoded = image::load_from_memory_with_format(data, ImageFormat::Png).map_err(
            |source| CoreError::ImageDecode {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        )?;

        Self::new(decoded.to_rgba8())
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Set one pixel. Out-of-bounds coordinates are rejected and leave the
    /// canvas untouched.
    pub fn apply(&self, x: i64, y: i64, color: Color) -> bool {
        self.apply_then(x, y, color, || {})
    }

    /// Set one pixel and run `on_applied` before the write lock is released,
    /// so writes and whatever `on_applied` publishes happen in the same order.
    /// `on_applied` must not touch the canvas. It is dropped unrun when the
    /// coordinates are out of bounds.
    pub fn apply_then(&self, x: i64, y: i64, color: Color, on_applied: impl FnOnce()) -> bool {
        let Some((x, y)) = self.checked_position(x, y) else {
            return false;
        };

        let mut pixels = self.pixels.write();
        pixels.put_pixel(x, y, color.into());
        self.version.fetch_add(1, Ordering::AcqRel);
        on_applied();

        true
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        let (x, y) = self.checked_position(x, y)?;
        Some(Color::from(*self.pixels.read().get_pixel(x, y)))
    }

    /// PNG encoding of the canvas.
    ///
    /// Returns the cached bytes when they match the current version. On a
    /// miss the pixels are copied out under the read lock and encoded without
    /// holding it, so writers are never blocked behind the encoder. The result
    /// reflects the canvas at some point no later than the call.
    pub fn encoded_snapshot(&self) -> Bytes {
        let current = self.version.load(Ordering::Acquire);
        if let Some(cached) = self.snapshot.lock().as_ref()
            && cached.version == current
        {
            return cached.bytes.clone();
        }

        let (version, image) = {
            let pixels = self.pixels.read();
            (self.version.load(Ordering::Acquire), pixels.clone())
        };

        match encode_png(&image) {
            Ok(bytes) => {
                let mut snapshot = self.snapshot.lock();
                if snapshot.as_ref().is_none_or(|cached| cached.version < version) {
                    debug!(
                        "Encoded canvas snapshot v{version} ({} bytes)",
                        bytes.len()
                    );
                    *snapshot = Some(EncodedSnapshot {
                        version,
                        bytes: bytes.clone(),
                    });
                }
                bytes
            }
            Err(e) => {
                error!("Failed to encode canvas snapshot: {e}");
                self.snapshot
                    .lock()
                    .as_ref()
                    .map(|cached| cached.bytes.clone())
                    .unwrap_or_default()
            }
        }
    }

    /// Number of accepted writes since construction.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    fn checked_position(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(y).ok().filter(|y| *y < self.height)?;
        Some((x, y))
    }
}

#[track_caller]
fn encode_png(image: &RgbaImage) -> CoreResult<Bytes> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|source| CoreError::ImageEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Bytes::from(buffer.into_inner()))
}
