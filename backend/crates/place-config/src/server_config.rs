use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_PORT, DEFAULT_STATIC_ROOT, MAX_MAX_CONNECTIONS, MIN_MAX_CONNECTIONS, MIN_PORT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of connection slots on the canvas
    pub max_connections: usize,
    /// Directory served as static files
    pub static_root: String,
    /// Path prefix the canvas endpoints are mounted under
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            static_root: String::from(DEFAULT_STATIC_ROOT),
            base_path: String::from(DEFAULT_BASE_PATH),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.max_connections < MIN_MAX_CONNECTIONS || self.max_connections > MAX_MAX_CONNECTIONS
        {
            return Err(ConfigError::server(format!(
                "server.max_connections must be {}-{}, got {}",
                MIN_MAX_CONNECTIONS, MAX_MAX_CONNECTIONS, self.max_connections
            )));
        }

        if !self.mounts_at_root()
            && (!self.base_path.starts_with('/') || self.base_path.ends_with('/'))
        {
            return Err(ConfigError::server(format!(
                "server.base_path must be '/' or start with '/' and have no trailing '/', got '{}'",
                self.base_path
            )));
        }

        Ok(())
    }

    /// An empty or `/` base path serves the engine routes from the root
    pub fn mounts_at_root(&self) -> bool {
        self.base_path.is_empty() || self.base_path == "/"
    }
}
