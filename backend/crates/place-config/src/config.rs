use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, CanvasConfig, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, RateLimitConfig, ServerConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub canvas: CanvasConfig,
    pub websocket: WebSocketConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for PLACE_CONFIG_DIR env var, else use ./.place/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PLACE_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PLACE_CONFIG_DIR env var > ./.place/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.canvas.validate()?;
        self.websocket.validate()?;
        self.rate_limit.validate()?;

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections), base path {}",
            self.server.host, self.server.port, self.server.max_connections, self.server.base_path
        );
        info!("  static root: {}", self.server.static_root);

        info!(
            "  canvas: {}x{}, load={}, save={} every {}s",
            self.canvas.width,
            self.canvas.height,
            self.canvas.load_path.as_deref().unwrap_or("<none>"),
            self.canvas.save_path,
            self.canvas.save_interval_secs
        );

        info!(
            "  websocket: send buffer={}, event buffer={}",
            self.websocket.send_buffer_size, self.websocket.event_buffer_size
        );

        info!(
            "  rate_limit: {}/s (min interval {}ms)",
            self.rate_limit.messages_per_sec, self.rate_limit.min_interval_ms
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("PLACE_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("PLACE_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "PLACE_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );
        Self::apply_env_string("PLACE_STATIC_ROOT", &mut self.server.static_root);
        Self::apply_env_string("PLACE_BASE_PATH", &mut self.server.base_path);

        // Canvas
        Self::apply_env_parse("PLACE_CANVAS_WIDTH", &mut self.canvas.width);
        Self::apply_env_parse("PLACE_CANVAS_HEIGHT", &mut self.canvas.height);
        Self::apply_env_option_string("PLACE_CANVAS_LOAD", &mut self.canvas.load_path);
        Self::apply_env_string("PLACE_CANVAS_SAVE", &mut self.canvas.save_path);
        Self::apply_env_parse(
            "PLACE_SAVE_INTERVAL_SECS",
            &mut self.canvas.save_interval_secs,
        );

        // WebSocket
        Self::apply_env_parse(
            "PLACE_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "PLACE_WS_EVENT_BUFFER_SIZE",
            &mut self.websocket.event_buffer_size,
        );

        // Rate limit
        Self::apply_env_parse(
            "PLACE_RATE_LIMIT_PER_SEC",
            &mut self.rate_limit.messages_per_sec,
        );
        Self::apply_env_parse(
            "PLACE_RATE_LIMIT_MIN_INTERVAL_MS",
            &mut self.rate_limit.min_interval_ms,
        );

        // Logging
        Self::apply_env_parse("PLACE_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PLACE_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PLACE_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
