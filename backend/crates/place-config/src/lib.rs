mod canvas_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod server_config;
mod websocket_config;

pub use canvas_config::CanvasConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;
pub use websocket_config::WebSocketConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "PLACE_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".place";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 64;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100_000;
const DEFAULT_STATIC_ROOT: &str = "./web/root";
const DEFAULT_BASE_PATH: &str = "/place";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
