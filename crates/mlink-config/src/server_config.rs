use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PUBLIC_DIR,
    DEFAULT_PUBLIC_URL, MIN_PORT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally reachable base URL embedded into magic-link emails
    pub public_url: String,
    /// Directory holding the HTML pages, avatars, and uploaded images
    pub public_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            public_url: String::from(DEFAULT_PUBLIC_URL),
            public_dir: String::from(DEFAULT_PUBLIC_DIR),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        // Any other port must be >= MIN_PORT (1024).
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if !self.public_url.starts_with("http://") && !self.public_url.starts_with("https://") {
            return Err(ConfigError::server(format!(
                "server.public_url must start with http:// or https://, got '{}'",
                self.public_url
            )));
        }

        if self.public_dir.is_empty() {
            return Err(ConfigError::server("server.public_dir must not be empty"));
        }

        Ok(())
    }
}
