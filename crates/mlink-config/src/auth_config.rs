use crate::{ConfigError, ConfigErrorResult, DEFAULT_COOKIE_NAME, DEFAULT_TOKEN_TTL_MINUTES};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Symmetric secret used to sign magic-link tokens. Required.
    pub secret: Option<String>,
    /// How long an issued magic link stays valid
    pub token_ttl_minutes: i64,
    /// Name of the httpOnly session cookie
    pub cookie_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            cookie_name: String::from(DEFAULT_COOKIE_NAME),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.secret is required (config.toml or MLINK_AUTH_SECRET)",
                ));
            }
            Some(secret) if secret.is_empty() => {
                return Err(ConfigError::auth("auth.secret must not be empty"));
            }
            Some(_) => {}
        }

        if self.token_ttl_minutes < 1 {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_minutes must be >= 1, got {}",
                self.token_ttl_minutes
            )));
        }

        if self.cookie_name.is_empty() {
            return Err(ConfigError::auth("auth.cookie_name must not be empty"));
        }

        Ok(())
    }
}
