use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::debug;

use crate::config::MailConfig;
use crate::types::error::AppError;
use crate::types::mail::SendEmail;

/// Thin client for the Resend-compatible email API. Delivery failures are
/// the caller's problem to log or swallow; nothing here retries.
#[derive(Clone)]
pub struct Mailer {
    client: Client,
    endpoint: String,
    api_key: String,
    sender: String,
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self, AppError> {
        let client = ClientBuilder::new()
            .user_agent("quillpress/1.0 (+reqwest)")
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Internal(format!("building mail client failed: {e}")))?;
        Ok(Mailer {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            sender: config.sender.clone(),
        })
    }

    pub async fn send(&self, email: SendEmail) -> Result<(), AppError> {
        debug!(to = ?email.to, subject = %email.subject, "dispatching email");

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key) // do NOT log the key
            .json(&email)
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("send failed: {e}")))?;

        let status = res.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(AppError::Mail(format!("mail API error: HTTP {status}: {body}")))
        }
    }

    pub async fn send_password_reset(&self, to: &str, reset_link: &str) -> Result<(), AppError> {
        self.send(SendEmail {
            from: self.sender.clone(),
            to: vec![to.to_string()],
            subject: "Password Reset Request".to_string(),
            html: None,
            text: Some(format!(
                "To reset your password, visit the following link:\n\n{reset_link}\n\n\
                 The link expires in 30 minutes. If you did not make this request, \
                 simply ignore this email and no changes will be made."
            )),
        })
        .await
    }
}
