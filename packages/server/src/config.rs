use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::events::models::FormFieldMap;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// OAuth access token used for both the Forms and Firestore APIs
    pub google_access_token: String,
    pub form_id: String,
    pub firestore_project_id: String,
    pub gemini_api_key: String,
    /// Mail settings are optional; without them declined-event
    /// notifications are logged instead of delivered.
    pub mailgun_domain: Option<String>,
    pub mailgun_api_key: Option<String>,
    pub mail_from: Option<String>,
    /// Question-id mapping for the submission form. Overridable via
    /// `FORM_FIELD_MAP` (JSON) so a new form revision needs no rebuild.
    pub field_map: FormFieldMap,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let field_map = match env::var("FORM_FIELD_MAP") {
            Ok(raw) => serde_json::from_str(&raw).context("FORM_FIELD_MAP must be valid JSON")?,
            Err(_) => FormFieldMap::default(),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            google_access_token: env::var("GOOGLE_ACCESS_TOKEN")
                .context("GOOGLE_ACCESS_TOKEN must be set")?,
            form_id: env::var("FORM_ID").context("FORM_ID must be set")?,
            firestore_project_id: env::var("FIRESTORE_PROJECT_ID")
                .context("FIRESTORE_PROJECT_ID must be set")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            mailgun_domain: env::var("MAILGUN_DOMAIN").ok(),
            mailgun_api_key: env::var("MAILGUN_API_KEY").ok(),
            mail_from: env::var("MAIL_FROM").ok(),
            field_map,
        })
    }
}
