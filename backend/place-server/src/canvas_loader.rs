use crate::error::{Result as ServerErrorResult, ServerError};

use place_config::CanvasConfig;
use place_core::{Canvas, Color};

use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};

/// Build the starting canvas.
///
/// A configured PNG that does not exist yet is not an error: the server
/// starts from a blank white canvas of the configured size and the first save
/// creates the file. A PNG that exists but cannot be read or decoded is.
pub fn load_canvas(config: &CanvasConfig) -> ServerErrorResult<Canvas> {
    let Some(ref load_path) = config.load_path else {
        info!(
            "No canvas to load, starting blank {}x{}",
            config.width, config.height
        );
        return blank_canvas(config);
    };

    let path = Path::new(load_path);
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Canvas file {} not found, starting blank {}x{}",
                path.display(),
                config.width,
                config.height
            );
            return blank_canvas(config);
        }
        Err(e) => {
            return Err(ServerError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let canvas = Canvas::from_png(&data)?;
    let (width, height) = canvas.bounds();
    info!("Loaded {width}x{height} canvas from {}", path.display());

    Ok(canvas)
}

fn blank_canvas(config: &CanvasConfig) -> ServerErrorResult<Canvas> {
    Ok(Canvas::filled(config.width, config.height, Color::WHITE)?)
}
