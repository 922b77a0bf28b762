use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Canvas must be at least 1x1, got {width}x{height} {location}")]
    EmptyCanvas {
        width: u32,
        height: u32,
        location: ErrorLocation,
    },

    #[error("Image decode failed: {source} {location}")]
    ImageDecode {
        #[source]
        source: image::ImageError,
        location: ErrorLocation,
    },

    #[error("Image encode failed: {source} {location}")]
    ImageEncode {
        #[source]
        source: image::ImageError,
        location: ErrorLocation,
    },
}

pub type CoreResult<T> = StdResult<T, CoreError>;
