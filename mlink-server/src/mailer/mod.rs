//! Email delivery boundary.
//!
//! The rest of the server only sees the [`Mailer`] trait; production uses
//! the SendGrid client, local development without an API key gets the
//! log-only mailer, and tests substitute a recorder.

pub mod log_mailer;
pub mod sendgrid;

pub use log_mailer::LogMailer;
pub use sendgrid::SendGridMailer;

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Email request failed: {source} {location}")]
    Request {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Email provider rejected message (HTTP {status}): {body} {location}")]
    Rejected {
        status: u16,
        body: String,
        location: ErrorLocation,
    },
}

impl From<reqwest::Error> for MailerError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Request {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MailerError>;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Short provider name for the health endpoint and startup logs
    fn name(&self) -> &'static str;

    /// Send one HTML message. A transient provider failure surfaces
    /// directly as an error; nothing is retried.
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}
