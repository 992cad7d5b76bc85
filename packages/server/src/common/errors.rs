//! Domain error taxonomy.
//!
//! Every external dependency failure maps to one variant here so that
//! callers see a stable shape regardless of which client produced it.
//! Batch loops (ingestion, triage) isolate these per item; single-item
//! operations surface them directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventsError {
    /// Form source auth/network failure
    #[error("form source unavailable: {0}")]
    SourceUnavailable(String),

    /// Document store read/write failure
    #[error("event store unavailable: {0}")]
    StoreUnavailable(String),

    /// Store rejected a write (e.g. concurrent update)
    #[error("event store conflict: {0}")]
    StoreConflict(String),

    /// Decision model call failed
    #[error("decision assistant unavailable: {0}")]
    AssistantUnavailable(String),

    /// Outbound email was rejected; never fatal to moderation
    #[error("email delivery failed: {0}")]
    DeliveryFailed(String),

    /// Moderation target title has no matching record
    #[error("no event found with title: {0}")]
    NotFound(String),
}

impl From<forms_client::FormsError> for EventsError {
    fn from(e: forms_client::FormsError) -> Self {
        EventsError::SourceUnavailable(e.to_string())
    }
}

impl From<firestore_client::FirestoreError> for EventsError {
    fn from(e: firestore_client::FirestoreError) -> Self {
        match e {
            firestore_client::FirestoreError::Api { status: 409, message } => {
                EventsError::StoreConflict(message)
            }
            other => EventsError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<gemini_client::GeminiError> for EventsError {
    fn from(e: gemini_client::GeminiError) -> Self {
        EventsError::AssistantUnavailable(e.to_string())
    }
}

impl From<mailer::MailerError> for EventsError {
    fn from(e: mailer::MailerError) -> Self {
        EventsError::DeliveryFailed(e.to_string())
    }
}
