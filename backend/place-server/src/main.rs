use place_server::{Cli, ShutdownCoordinator, SnapshotWriter, build_router, load_canvas, logger};
use place_ws::{BroadcastConfig, ConnectionConfig, Place, PlaceOptions, RateLimitConfig};

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Load configuration; command-line flags win over file and environment
    let mut config = place_config::Config::load()?;
    cli.apply(&mut config);
    config.validate()?;

    // Construct log file path if configured
    let log_file_path = if let Some(ref filename) = config.logging.file {
        let config_dir = place_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting place-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let canvas = load_canvas(&config.canvas)?;

    let place = Place::new(
        canvas,
        PlaceOptions {
            max_connections: config.server.max_connections,
            connection: ConnectionConfig {
                send_buffer_size: config.websocket.send_buffer_size,
                ..Default::default()
            },
            broadcast: BroadcastConfig {
                event_buffer_size: config.websocket.event_buffer_size,
            },
            rate_limit: RateLimitConfig {
                messages_per_sec: config.rate_limit.messages_per_sec,
                min_interval: Duration::from_millis(config.rate_limit.min_interval_ms),
            },
        },
    );

    let shutdown = ShutdownCoordinator::new();

    let saver = SnapshotWriter::new(
        &config.canvas.save_path,
        Duration::from_secs(config.canvas.save_interval_secs),
    )
    .spawn(place.canvas().clone(), shutdown.subscribe_guard());

    if !Path::new(&config.server.static_root).is_dir() {
        warn!(
            "Static root {} is not a directory; only {} will be served",
            config.server.static_root, config.server.base_path
        );
    }

    let app = build_router(place.router(), &config.server);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {actual_addr}");

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {e}");
            }
        }
    });

    info!("Server ready to accept connections");
    let mut serve_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            serve_guard.wait().await;
        })
        .await?;

    // Make sure the final save lands before exiting
    if let Err(e) = saver.await {
        error!("Canvas saver task failed: {e}");
    }

    info!("Graceful shutdown complete");
    Ok(())
}
