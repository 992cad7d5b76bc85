// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The
// ingestion pipeline and moderation engine are domain functions that
// use these traits; production implementations live in adapters.rs,
// mocks in test_dependencies.rs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::EventsError;
use crate::domains::events::models::{Event, EventStatus, RawSubmission};

// =============================================================================
// Form Source (Infrastructure - raw submissions)
// =============================================================================

#[async_trait]
pub trait FormSource: Send + Sync {
    /// Fetch all submissions currently held by the form service.
    async fn fetch_responses(&self) -> Result<Vec<RawSubmission>, EventsError>;
}

// =============================================================================
// Event Store (Infrastructure - document database)
// =============================================================================

#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events whose raw title equals `title` exactly, in the
    /// store's result order.
    async fn find_by_title(&self, title: &str) -> Result<Vec<Event>, EventsError>;

    /// Insert a new event and return the store-assigned id.
    async fn insert(&self, event: &Event) -> Result<String, EventsError>;

    /// Patch one event's status plus the matching audit pair.
    async fn update_status(
        &self,
        id: &str,
        status: EventStatus,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<(), EventsError>;

    /// All events whose `status` field equals the given string. An
    /// unrecognized status is a legal query that returns an empty list.
    async fn list_by_status(&self, status: &str) -> Result<Vec<Event>, EventsError>;
}

// =============================================================================
// Notifier (Infrastructure - outbound email)
// =============================================================================

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EventsError>;
}

// =============================================================================
// Decision Model (Infrastructure - generic LLM completion)
// =============================================================================

#[async_trait]
pub trait DecisionModel: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String, EventsError>;
}
