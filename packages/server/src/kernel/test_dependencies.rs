// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for
// tests. Each mock records its calls and supports failure injection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::common::EventsError;
use crate::domains::events::models::{Event, EventStatus, RawSubmission};
use crate::kernel::traits::{DecisionModel, EventStore, FormSource, Notifier};

// =============================================================================
// In-memory Event Store
// =============================================================================

#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
    fail_lookups: AtomicBool,
    fail_inserts: AtomicBool,
    fail_updates: AtomicBool,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read operation fail with StoreUnavailable.
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of everything stored, for assertions.
    pub fn all(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Seed a record directly, bypassing the ingestion pipeline.
    pub fn seed(&self, mut event: Event) -> String {
        let id = Uuid::new_v4().to_string();
        event.id = Some(id.clone());
        self.events.lock().unwrap().push(event);
        id
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find_by_title(&self, title: &str) -> Result<Vec<Event>, EventsError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(EventsError::StoreUnavailable("lookup failure injected".into()));
        }
        let events = self.events.lock().unwrap();
        Ok(events.iter().filter(|e| e.title == title).cloned().collect())
    }

    async fn insert(&self, event: &Event) -> Result<String, EventsError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(EventsError::StoreUnavailable("insert failure injected".into()));
        }
        let id = Uuid::new_v4().to_string();
        let mut stored = event.clone();
        stored.id = Some(id.clone());
        self.events.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn update_status(
        &self,
        id: &str,
        status: EventStatus,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<(), EventsError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(EventsError::StoreUnavailable("update failure injected".into()));
        }
        let mut events = self.events.lock().unwrap();
        match events.iter_mut().find(|e| e.id.as_deref() == Some(id)) {
            Some(event) => {
                event.apply_transition(status, actor, at);
                Ok(())
            }
            None => Err(EventsError::NotFound(id.to_string())),
        }
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Event>, EventsError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(EventsError::StoreUnavailable("lookup failure injected".into()));
        }
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.status.to_string() == status)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Static Form Source
// =============================================================================

pub struct StaticFormSource {
    submissions: Mutex<Vec<RawSubmission>>,
    fail: AtomicBool,
}

impl StaticFormSource {
    pub fn new(submissions: Vec<RawSubmission>) -> Self {
        Self {
            submissions: Mutex::new(submissions),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl FormSource for StaticFormSource {
    async fn fetch_responses(&self) -> Result<Vec<RawSubmission>, EventsError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EventsError::SourceUnavailable("fetch failure injected".into()));
        }
        Ok(self.submissions.lock().unwrap().clone())
    }
}

// =============================================================================
// Recording Notifier
// =============================================================================

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentMail>>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EventsError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EventsError::DeliveryFailed("send failure injected".into()));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Scripted Decision Model
// =============================================================================

/// Returns queued responses in order; repeats the last one when the
/// queue runs dry.
pub struct ScriptedModel {
    responses: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl ScriptedModel {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail_completions(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Prompts received so far, for assertions.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl DecisionModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, EventsError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EventsError::AssistantUnavailable(
                "completion failure injected".into(),
            ));
        }
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            Ok(responses.remove(0))
        } else {
            responses
                .first()
                .cloned()
                .ok_or_else(|| EventsError::AssistantUnavailable("no scripted response".into()))
        }
    }
}
