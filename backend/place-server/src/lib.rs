pub mod canvas_loader;
pub mod cli;
pub mod error;
pub mod logger;
pub mod routes;
pub mod shutdown;
pub mod snapshot_writer;

#[cfg(test)]
mod tests;

pub use canvas_loader::load_canvas;
pub use cli::Cli;
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
pub use shutdown::{ShutdownCoordinator, ShutdownGuard};
pub use snapshot_writer::SnapshotWriter;
