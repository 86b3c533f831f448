use crate::mailer::{Mailer, MailerError, Result as MailerResult};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::debug;
use mlink_config::EmailConfig;
use serde_json::json;

/// SendGrid v3 `mail/send` client.
pub struct SendGridMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl SendGridMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url,
            api_key: config.api_key.unwrap_or_default(),
            from_email: config.from_email,
            from_name: config.from_name,
        }
    }

    fn payload(&self, to: &str, subject: &str, html_body: &str) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_email, "name": self.from_name },
            "subject": subject,
            "content": [{ "type": "text/html", "value": html_body }],
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> MailerResult<()> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(to, subject, html_body))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("SendGrid accepted message to {} ({})", to, status);
        Ok(())
    }
}
