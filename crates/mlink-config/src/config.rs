use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, EmailConfig, LoggingConfig, ServerConfig,
    StoreConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for MLINK_CONFIG_DIR env var, else use ./.mlink/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply MLINK_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MLINK_CONFIG_DIR env var > ./.mlink/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("MLINK_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".mlink"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.email.validate()?;

        // Validate store path doesn't escape config dir
        let store_path = std::path::Path::new(&self.store.path);
        if store_path.is_absolute() || self.store.path.contains("..") {
            return Err(ConfigError::store(
                "store.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to the user store file.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.store.path))
    }

    /// Get the public directory as a path.
    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.server.public_dir)
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} ({})",
            self.server.host, self.server.port, self.server.public_url
        );
        info!("  public_dir: {}", self.server.public_dir);
        info!("  store: {}", self.store.path);

        info!(
            "  auth: secret {}, ttl={}m, cookie='{}'",
            if self.auth.secret.is_some() {
                "set"
            } else {
                "NOT SET"
            },
            self.auth.token_ttl_minutes,
            self.auth.cookie_name
        );

        info!(
            "  email: {} (from '{}' <{}>)",
            if self.email.delivery_enabled() {
                "sendgrid"
            } else {
                "log-only"
            },
            self.email.from_name,
            self.email.from_email
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("MLINK_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("MLINK_SERVER_PORT", &mut self.server.port);
        Self::apply_env_string("MLINK_SERVER_PUBLIC_URL", &mut self.server.public_url);
        Self::apply_env_string("MLINK_SERVER_PUBLIC_DIR", &mut self.server.public_dir);

        // Store
        Self::apply_env_string("MLINK_STORE_PATH", &mut self.store.path);

        // Auth
        Self::apply_env_option_string("MLINK_AUTH_SECRET", &mut self.auth.secret);
        Self::apply_env_parse(
            "MLINK_AUTH_TOKEN_TTL_MINUTES",
            &mut self.auth.token_ttl_minutes,
        );
        Self::apply_env_string("MLINK_AUTH_COOKIE_NAME", &mut self.auth.cookie_name);

        // Email
        Self::apply_env_option_string("MLINK_EMAIL_API_KEY", &mut self.email.api_key);
        Self::apply_env_string("MLINK_EMAIL_FROM_EMAIL", &mut self.email.from_email);
        Self::apply_env_string("MLINK_EMAIL_FROM_NAME", &mut self.email.from_name);
        Self::apply_env_string("MLINK_EMAIL_API_URL", &mut self.email.api_url);

        // Logging
        Self::apply_env_parse("MLINK_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MLINK_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MLINK_LOG_FILE", &mut self.logging.file);
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
