use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Server full: all {capacity} connection slots occupied {location}")]
    ServerFull {
        capacity: usize,
        location: ErrorLocation,
    },

    #[error("Invalid message: {message} {location}")]
    InvalidMessage {
        message: String,
        location: ErrorLocation,
    },

    #[error("Placement ({x}, {y}) outside {width}x{height} canvas {location}")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded {location}")]
    RateLimited { location: ErrorLocation },

    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Broadcast loop is no longer running {location}")]
    BroadcastClosed { location: ErrorLocation },

    #[error("JSON encode failed: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Short label used for metrics and close reasons
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServerFull { .. } => "server_full",
            Self::InvalidMessage { .. } => "invalid_message",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::RateLimited { .. } => "rate_limited",
            Self::ConnectionClosed { .. } => "connection_closed",
            Self::BroadcastClosed { .. } => "broadcast_closed",
            Self::Encode { .. } => "encode_error",
        }
    }
}

impl From<serde_json::Error> for WsError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
