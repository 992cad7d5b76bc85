//! Server dependencies (using traits for testability)
//!
//! Central dependency container built once at process start and passed
//! by reference to every component that needs it. Construction is
//! fail-fast: if a client cannot be built from config, startup stops.

use std::sync::Arc;

use firestore_client::FirestoreClient;
use forms_client::FormsClient;
use gemini_client::{GeminiClient, GEMINI_FLASH};
use mailer::{MailerClient, MailerOptions};

use crate::config::Config;
use crate::domains::events::models::FormFieldMap;
use crate::kernel::adapters::{
    FirestoreEventStore, GeminiModel, GoogleFormSource, LogNotifier, MailgunNotifier,
};
use crate::kernel::traits::{DecisionModel, EventStore, FormSource, Notifier};

/// Server dependencies accessible to domain operations
#[derive(Clone)]
pub struct ServerDeps {
    pub form_source: Arc<dyn FormSource>,
    pub store: Arc<dyn EventStore>,
    pub notifier: Arc<dyn Notifier>,
    pub model: Arc<dyn DecisionModel>,
    pub field_map: FormFieldMap,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        form_source: Arc<dyn FormSource>,
        store: Arc<dyn EventStore>,
        notifier: Arc<dyn Notifier>,
        model: Arc<dyn DecisionModel>,
        field_map: FormFieldMap,
    ) -> Self {
        Self {
            form_source,
            store,
            notifier,
            model,
            field_map,
        }
    }

    /// Wire up production clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let form_source = Arc::new(GoogleFormSource::new(
            FormsClient::new(config.google_access_token.clone()),
            config.form_id.clone(),
        ));

        let store = Arc::new(FirestoreEventStore::new(FirestoreClient::new(
            config.firestore_project_id.clone(),
            config.google_access_token.clone(),
        )));

        let model = Arc::new(GeminiModel::new(
            GeminiClient::new(config.gemini_api_key.clone()),
            GEMINI_FLASH,
        ));

        let notifier: Arc<dyn Notifier> = match (
            &config.mailgun_domain,
            &config.mailgun_api_key,
            &config.mail_from,
        ) {
            (Some(domain), Some(api_key), Some(from)) => {
                Arc::new(MailgunNotifier::new(MailerClient::new(MailerOptions {
                    domain: domain.clone(),
                    api_key: api_key.clone(),
                    from: from.clone(),
                })))
            }
            _ => {
                tracing::warn!("Mail credentials not set; declined-event emails will be logged only");
                Arc::new(LogNotifier)
            }
        };

        Self::new(form_source, store, notifier, model, config.field_map.clone())
    }
}
