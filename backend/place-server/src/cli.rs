use place_config::{Config, LogLevel};

use clap::Parser;

/// Command-line flags. Anything given here overrides config.toml and the
/// PLACE_* environment.
#[derive(Parser, Debug, Default)]
#[command(name = "place-server")]
#[command(about = "Shared pixel canvas with real-time WebSocket updates")]
#[command(version)]
pub struct Cli {
    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Directory of static web files
    #[arg(long)]
    pub root: Option<String>,

    /// PNG to start the canvas from
    #[arg(long)]
    pub load: Option<String>,

    /// Where the canvas is saved
    #[arg(long)]
    pub save: Option<String>,

    /// Canvas width for a fresh canvas
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height for a fresh canvas
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum simultaneous WebSocket connections
    #[arg(long)]
    pub count: Option<usize>,

    /// Seconds between canvas saves
    #[arg(long)]
    pub save_interval: Option<u64>,

    /// off, error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref host) = self.host {
            config.server.host.clone_from(host);
        }
        if let Some(ref root) = self.root {
            config.server.static_root.clone_from(root);
        }
        if let Some(count) = self.count {
            config.server.max_connections = count;
        }

        if let Some(ref load) = self.load {
            config.canvas.load_path = Some(load.clone());
        }
        if let Some(ref save) = self.save {
            config.canvas.save_path.clone_from(save);
        }
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if let Some(secs) = self.save_interval {
            config.canvas.save_interval_secs = secs;
        }

        if let Some(ref level) = self.log_level {
            config.logging.level = LogLevel::parse_lenient(level);
        }
    }
}
