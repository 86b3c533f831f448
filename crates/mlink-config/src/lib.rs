mod auth_config;
mod config;
mod email_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;
mod store_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use email_config::EmailConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use store_config::StoreConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_STORE_FILENAME: &str = "users.json";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 20;
const DEFAULT_COOKIE_NAME: &str = "mlink_session";
const DEFAULT_FROM_EMAIL: &str = "login@mlink.local";
const DEFAULT_FROM_NAME: &str = "Magic Link Login";
const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const MIN_PORT: u16 = 1024;

#[cfg(test)]
mod tests;
