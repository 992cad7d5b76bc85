//! Pure Mailgun REST API client.
//!
//! Sends a single HTML email per call. No templating, no queueing.

use std::collections::HashMap;

pub mod error;
pub mod models;

pub use error::{MailerError, Result};
pub use models::SendResponse;

use reqwest::Client;

#[derive(Debug, Clone)]
pub struct MailerOptions {
    /// Sending domain, e.g. `mg.example.org`.
    pub domain: String,
    pub api_key: String,
    /// From header, e.g. `TSS Calendar <calendar@mg.example.org>`.
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct MailerClient {
    options: MailerOptions,
    client: Client,
}

impl MailerClient {
    pub fn new(options: MailerOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Send one HTML email.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<SendResponse> {
        let url = format!(
            "https://api.mailgun.net/v3/{}/messages",
            self.options.domain
        );

        let mut form_body: HashMap<&str, String> = HashMap::new();
        form_body.insert("from", self.options.from.clone());
        form_body.insert("to", to.to_string());
        form_body.insert("subject", subject.to_string());
        form_body.insert("html", html.to_string());

        let resp = self
            .client
            .post(&url)
            .basic_auth("api", Some(self.options.api_key.clone()))
            .form(&form_body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(to, status = status.as_u16(), "Mail delivery rejected");
            return Err(MailerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let result: SendResponse = resp.json().await.unwrap_or(SendResponse {
            id: None,
            message: None,
        });
        tracing::info!(to, subject, id = ?result.id, "Email sent");
        Ok(result)
    }
}
