//! Moderation engine: terminal status transitions with audit stamps.
//!
//! Transitions are keyed by exact title match. Titles are unique by
//! construction (the ingestion pipeline rejects duplicates at insert
//! time); if the store nevertheless holds several records with one
//! title, the first match in store order wins.
//!
//! Error policy, held consistently per operation:
//! - `exists` fails open to `false` (it is only ever a guard before
//!   insert, and a missed duplicate is recoverable);
//! - everything else fails closed and surfaces the store error.

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::common::EventsError;
use crate::domains::events::models::{Event, EventStatus};
use crate::kernel::traits::EventStore;

/// Actor recorded when no explicit reviewer is given (automated
/// decision paths).
pub const SYSTEM_ACTOR: &str = "system";

/// Outcome of an approve/decline call. "Not found" and "already
/// resolved" are results, not errors: a batch caller applying model
/// decisions must keep going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ModerationOutcome {
    Applied { id: String },
    NotFound,
    /// The event already reached a terminal status; no write happens.
    AlreadyResolved { status: EventStatus },
}

/// Approve the event with this exact title.
pub async fn approve(
    store: &dyn EventStore,
    title: &str,
    actor: &str,
) -> Result<ModerationOutcome, EventsError> {
    transition(store, title, actor, EventStatus::Approved).await
}

/// Decline the event with this exact title.
pub async fn decline(
    store: &dyn EventStore,
    title: &str,
    actor: &str,
) -> Result<ModerationOutcome, EventsError> {
    transition(store, title, actor, EventStatus::Declined).await
}

async fn transition(
    store: &dyn EventStore,
    title: &str,
    actor: &str,
    target: EventStatus,
) -> Result<ModerationOutcome, EventsError> {
    let matches = store.find_by_title(title).await?;

    let event = match matches.first() {
        Some(event) => event,
        None => {
            warn!(title = %title, "No event found with this title");
            return Ok(ModerationOutcome::NotFound);
        }
    };

    if event.status != EventStatus::Pending {
        warn!(title = %title, status = %event.status, "Event already resolved; skipping");
        return Ok(ModerationOutcome::AlreadyResolved {
            status: event.status,
        });
    }

    let id = event
        .id
        .clone()
        .ok_or_else(|| EventsError::StoreUnavailable("stored event has no id".to_string()))?;

    store.update_status(&id, target, actor, Utc::now()).await?;
    tracing::info!(title = %title, id = %id, status = %target, actor = %actor, "Event transitioned");
    Ok(ModerationOutcome::Applied { id })
}

/// All events whose status field equals `status` exactly. No enum
/// validation here on purpose: an unknown status is a legal query
/// that returns an empty list.
pub async fn list_by_status(
    store: &dyn EventStore,
    status: &str,
) -> Result<Vec<Event>, EventsError> {
    store.list_by_status(status).await
}

/// Existence check used as the ingestion dedup guard. Fails open: a
/// lookup failure reads as "does not exist".
pub async fn exists(store: &dyn EventStore, title: &str) -> bool {
    match store.find_by_title(title).await {
        Ok(matches) => !matches.is_empty(),
        Err(e) => {
            warn!(title = %title, error = %e, "Existence check failed; treating as absent");
            false
        }
    }
}
