//! Production implementations of the kernel traits, each a thin
//! adapter over one of the client crates. Wire-format mapping for the
//! document store lives here so the domain code never sees it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::str::FromStr;

use firestore_client::{Document, FirestoreClient, Value};
use forms_client::FormsClient;
use gemini_client::GeminiClient;
use mailer::MailerClient;

use crate::common::EventsError;
use crate::domains::events::models::{Event, EventStatus, RawSubmission};
use crate::kernel::traits::{DecisionModel, EventStore, FormSource, Notifier};

/// Collection holding event documents.
const EVENTS_COLLECTION: &str = "events";

// =============================================================================
// Google Forms adapter
// =============================================================================

pub struct GoogleFormSource {
    client: FormsClient,
    form_id: String,
}

impl GoogleFormSource {
    pub fn new(client: FormsClient, form_id: String) -> Self {
        Self { client, form_id }
    }
}

#[async_trait]
impl FormSource for GoogleFormSource {
    async fn fetch_responses(&self) -> Result<Vec<RawSubmission>, EventsError> {
        let responses = self.client.list_responses(&self.form_id).await?;
        let submissions = responses
            .into_iter()
            .map(|r| {
                let mut answers = HashMap::new();
                for (question_id, _) in r.answers.iter() {
                    if let Some(text) = r.answer_text(question_id) {
                        answers.insert(question_id.clone(), text.to_string());
                    }
                }
                RawSubmission {
                    answers,
                    create_time: r.create_time.clone().unwrap_or_default(),
                    respondent_email: r.respondent_email.clone(),
                }
            })
            .collect();
        Ok(submissions)
    }
}

// =============================================================================
// Firestore adapter
// =============================================================================

pub struct FirestoreEventStore {
    client: FirestoreClient,
}

impl FirestoreEventStore {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }
}

fn optional_string(value: Option<&String>) -> Value {
    match value {
        Some(s) => Value::string(s.clone()),
        None => Value::null(),
    }
}

/// Flatten an event into Firestore fields. Audit fields are written
/// only once the matching transition has happened.
pub fn event_to_fields(event: &Event) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("title".to_string(), Value::string(event.title.clone()));
    fields.insert(
        "title_lower".to_string(),
        Value::string(event.title_lower.clone()),
    );
    fields.insert(
        "supervisor".to_string(),
        optional_string(event.supervisor.as_ref()),
    );
    fields.insert("date".to_string(), optional_string(event.date.as_ref()));
    fields.insert("time".to_string(), optional_string(event.time.as_ref()));
    fields.insert(
        "description".to_string(),
        optional_string(event.description.as_ref()),
    );
    fields.insert(
        "category".to_string(),
        optional_string(event.category.as_ref()),
    );
    fields.insert(
        "weekly".to_string(),
        match event.weekly {
            Some(w) => Value::boolean(w),
            None => Value::null(),
        },
    );
    fields.insert(
        "status".to_string(),
        Value::string(event.status.to_string()),
    );
    fields.insert(
        "submitTime".to_string(),
        Value::string(event.submit_time.clone()),
    );
    fields.insert(
        "respondentEmail".to_string(),
        optional_string(event.respondent_email.as_ref()),
    );
    if let Some(by) = &event.approved_by {
        fields.insert("approvedBy".to_string(), Value::string(by.clone()));
    }
    if let Some(at) = &event.approved_at {
        fields.insert("approvedAt".to_string(), Value::string(at.clone()));
    }
    if let Some(by) = &event.declined_by {
        fields.insert("declinedBy".to_string(), Value::string(by.clone()));
    }
    if let Some(at) = &event.declined_at {
        fields.insert("declinedAt".to_string(), Value::string(at.clone()));
    }
    fields
}

/// Rebuild an event from a Firestore document.
pub fn document_to_event(doc: &Document) -> Result<Event, EventsError> {
    let title = doc
        .field_str("title")
        .ok_or_else(|| EventsError::StoreUnavailable("document missing title".to_string()))?
        .to_string();
    let status_raw = doc.field_str("status").unwrap_or("pending");
    let status = EventStatus::from_str(status_raw)
        .map_err(|e| EventsError::StoreUnavailable(e.to_string()))?;

    Ok(Event {
        id: doc.doc_id().map(str::to_string),
        title_lower: doc
            .field_str("title_lower")
            .map(str::to_string)
            .unwrap_or_else(|| title.to_lowercase()),
        title,
        supervisor: doc.field_str("supervisor").map(str::to_string),
        date: doc.field_str("date").map(str::to_string),
        time: doc.field_str("time").map(str::to_string),
        description: doc.field_str("description").map(str::to_string),
        category: doc.field_str("category").map(str::to_string),
        weekly: doc.field_bool("weekly"),
        submit_time: doc.field_str("submitTime").unwrap_or_default().to_string(),
        respondent_email: doc.field_str("respondentEmail").map(str::to_string),
        status,
        approved_by: doc.field_str("approvedBy").map(str::to_string),
        approved_at: doc.field_str("approvedAt").map(str::to_string),
        declined_by: doc.field_str("declinedBy").map(str::to_string),
        declined_at: doc.field_str("declinedAt").map(str::to_string),
    })
}

#[async_trait]
impl EventStore for FirestoreEventStore {
    async fn find_by_title(&self, title: &str) -> Result<Vec<Event>, EventsError> {
        let docs = self
            .client
            .query_equal(EVENTS_COLLECTION, "title", title)
            .await?;
        docs.iter().map(document_to_event).collect()
    }

    async fn insert(&self, event: &Event) -> Result<String, EventsError> {
        let created = self
            .client
            .create_document(EVENTS_COLLECTION, event_to_fields(event))
            .await?;
        created
            .doc_id()
            .map(str::to_string)
            .ok_or_else(|| EventsError::StoreUnavailable("created document has no name".to_string()))
    }

    async fn update_status(
        &self,
        id: &str,
        status: EventStatus,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<(), EventsError> {
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), Value::string(status.to_string()));
        match status {
            EventStatus::Approved => {
                fields.insert("approvedBy".to_string(), Value::string(actor));
                fields.insert("approvedAt".to_string(), Value::string(at.to_rfc3339()));
            }
            EventStatus::Declined => {
                fields.insert("declinedBy".to_string(), Value::string(actor));
                fields.insert("declinedAt".to_string(), Value::string(at.to_rfc3339()));
            }
            EventStatus::Pending => {}
        }
        self.client
            .patch_document(EVENTS_COLLECTION, id, fields)
            .await?;
        Ok(())
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Event>, EventsError> {
        let docs = self
            .client
            .query_equal(EVENTS_COLLECTION, "status", status)
            .await?;
        docs.iter().map(document_to_event).collect()
    }
}

// =============================================================================
// Gemini adapter
// =============================================================================

pub struct GeminiModel {
    client: GeminiClient,
    model: String,
}

impl GeminiModel {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl DecisionModel for GeminiModel {
    async fn complete(&self, prompt: &str) -> Result<String, EventsError> {
        let text = self.client.generate_content(&self.model, prompt).await?;
        Ok(text)
    }
}

// =============================================================================
// Mail adapters
// =============================================================================

pub struct MailgunNotifier {
    client: MailerClient,
}

impl MailgunNotifier {
    pub fn new(client: MailerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for MailgunNotifier {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EventsError> {
        self.client.send(to, subject, html).await?;
        Ok(())
    }
}

/// Fallback notifier for environments without mail credentials.
/// Logs the would-be delivery and succeeds.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<(), EventsError> {
        tracing::info!(to, subject, "Mail delivery skipped (no mail credentials)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event::pending(
            "Bake Sale".to_string(),
            Some("Ms. Frizzle".to_string()),
            Some("2025-03-01".to_string()),
            None,
            Some("Cupcakes in the gym".to_string()),
            Some("Fundraiser".to_string()),
            Some(false),
            "2025-02-20T08:00:00Z".to_string(),
            Some("kid@example.org".to_string()),
        )
    }

    #[test]
    fn event_fields_round_trip_through_document() {
        let event = sample_event();
        let doc = Document {
            name: Some("projects/p/databases/(default)/documents/events/id1".to_string()),
            fields: event_to_fields(&event),
        };
        let back = document_to_event(&doc).unwrap();
        assert_eq!(back.id.as_deref(), Some("id1"));
        assert_eq!(back.title, "Bake Sale");
        assert_eq!(back.title_lower, "bake sale");
        assert_eq!(back.status, EventStatus::Pending);
        assert_eq!(back.weekly, Some(false));
        assert_eq!(back.supervisor.as_deref(), Some("Ms. Frizzle"));
        assert!(back.approved_by.is_none());
    }

    #[test]
    fn pending_event_writes_no_audit_fields() {
        let fields = event_to_fields(&sample_event());
        assert!(!fields.contains_key("approvedBy"));
        assert!(!fields.contains_key("declinedAt"));
        assert_eq!(fields["status"].as_str(), Some("pending"));
    }

    #[test]
    fn document_with_unknown_status_is_a_store_error() {
        let mut fields = event_to_fields(&sample_event());
        fields.insert("status".to_string(), Value::string("archived"));
        let doc = Document {
            name: None,
            fields,
        };
        assert!(document_to_event(&doc).is_err());
    }
}
