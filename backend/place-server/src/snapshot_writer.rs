use crate::ShutdownGuard;
use crate::error::{Result as ServerErrorResult, ServerError};

use place_core::Canvas;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Periodically persists the canvas to disk, plus once more at shutdown.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
    interval: Duration,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save now and on every interval until `guard` fires, then save one final time.
    pub fn spawn(self, canvas: Arc<Canvas>, mut guard: ShutdownGuard) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Saving canvas to {} every {}s",
                self.path.display(),
                self.interval.as_secs()
            );

            let mut ticker = interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.save_logged(&canvas).await,
                    _ = guard.wait() => break,
                }
            }

            info!("Saving canvas before shutdown");
            self.save_logged(&canvas).await;
        })
    }

    /// Encode and write on the blocking pool
    pub async fn save(&self, canvas: &Arc<Canvas>) -> ServerErrorResult<()> {
        let canvas = Arc::clone(canvas);
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &canvas.encoded_snapshot()))
            .await
            .map_err(|e| ServerError::Io {
                path: self.path.clone(),
                source: std::io::Error::other(e),
            })?
    }

    async fn save_logged(&self, canvas: &Arc<Canvas>) {
        match self.save(canvas).await {
            Ok(()) => debug!("Canvas saved to {}", self.path.display()),
            Err(e) => error!("Failed to save canvas: {e}"),
        }
    }
}

/// Write to a sibling temp file, then rename over the target so readers
/// never see a partial PNG.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> ServerErrorResult<()> {
    if bytes.is_empty() {
        return Err(ServerError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other("snapshot is empty"),
        });
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, bytes).map_err(|e| ServerError::Io {
        path: tmp_path.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| ServerError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
