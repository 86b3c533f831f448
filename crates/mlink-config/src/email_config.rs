use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FROM_EMAIL, DEFAULT_FROM_NAME, DEFAULT_SENDGRID_API_URL,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// SendGrid API key. When absent the server logs magic links instead
    /// of sending them.
    pub api_key: Option<String>,
    pub from_email: String,
    pub from_name: String,
    /// SendGrid mail/send endpoint; overridable so tests can point at a mock
    pub api_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_email: String::from(DEFAULT_FROM_EMAIL),
            from_name: String::from(DEFAULT_FROM_NAME),
            api_url: String::from(DEFAULT_SENDGRID_API_URL),
        }
    }
}

impl EmailConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.from_email.is_empty() || !self.from_email.contains('@') {
            return Err(ConfigError::email(format!(
                "email.from_email must be an email address, got '{}'",
                self.from_email
            )));
        }

        if self.api_url.is_empty() {
            return Err(ConfigError::email("email.api_url must not be empty"));
        }

        Ok(())
    }

    /// True when a real delivery provider is configured
    pub fn delivery_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}
