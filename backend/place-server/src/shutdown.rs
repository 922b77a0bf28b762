use log::info;
use tokio::sync::watch;

/// Graceful shutdown coordinator.
///
/// Backed by a watch channel, so a guard created after the signal still sees
/// it.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { shutdown_tx }
    }

    /// Trigger shutdown (call this from signal handler)
    pub fn shutdown(&self) {
        info!("Shutdown signal received, notifying all subsystems");
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard {
            shutdown_rx: self.shutdown_tx.subscribe(),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Handed to each task that must stop on shutdown
pub struct ShutdownGuard {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    /// Wait for shutdown signal. Returns immediately if it already fired.
    pub async fn wait(&mut self) {
        // Err means every coordinator is gone; nothing can signal anymore
        let _ = self.shutdown_rx.wait_for(|stopped| *stopped).await;
    }

    /// Non-blocking check
    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }
}
