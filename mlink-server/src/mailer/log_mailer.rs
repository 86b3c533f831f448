use crate::mailer::{Mailer, Result as MailerResult};

use async_trait::async_trait;
use log::info;

/// Development mailer: logs messages instead of delivering them, so the
/// magic-link flow stays usable without a SendGrid key.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> MailerResult<()> {
        info!("Email to {} - {}", to, subject);
        info!("{}", html_body);
        Ok(())
    }
}
