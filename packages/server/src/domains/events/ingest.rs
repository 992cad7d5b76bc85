//! Ingestion pipeline: raw form submissions → pending event records.
//!
//! Submissions are processed independently, in input order. A bad
//! record never blocks the batch: extraction or store failures for one
//! submission land in `errors` and processing continues.
//!
//! Re-running ingestion against the same form state adds nothing,
//! because each submission is checked against the store by title
//! before insert. There is no guard against two *concurrent* ingest
//! calls racing past the existence check; the reference deployment is
//! single-caller and this is a documented limitation, not a bug to
//! paper over with locking.

use serde::Serialize;
use tracing::{info, warn};

use crate::domains::events::models::{Event, FormFieldMap, RawSubmission};
use crate::domains::events::moderation;
use crate::kernel::traits::EventStore;

/// Batch summary returned to the caller. Partial failure is reported
/// here, never thrown.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestResult {
    pub added: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Fields pulled out of one submission by the configured question-id
/// mapping.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub title: Option<String>,
    pub supervisor: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub weekly: Option<bool>,
}

/// Extract answer fields from a raw submission. Pure function; the
/// mapping is configuration, not logic.
pub fn extract_fields(raw: &RawSubmission, map: &FormFieldMap) -> ExtractedFields {
    let answer = |id: &str| raw.answers.get(id).cloned();

    // "Yes" means weekly; any other answer means one-off; no answer
    // means the question was left blank.
    let weekly = raw.answers.get(&map.weekly).map(|a| a == "Yes");

    ExtractedFields {
        title: answer(&map.title),
        supervisor: answer(&map.supervisor),
        date: answer(&map.date),
        time: answer(&map.time),
        description: answer(&map.description),
        category: answer(&map.category),
        weekly,
    }
}

/// Ingest a batch of raw submissions into the store.
pub async fn ingest(
    store: &dyn EventStore,
    map: &FormFieldMap,
    submissions: &[RawSubmission],
) -> IngestResult {
    let mut result = IngestResult::default();

    for raw in submissions {
        let fields = extract_fields(raw, map);

        let title = match fields.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            // Blank or missing title: drop the submission. This is a
            // skip, not an error.
            _ => {
                result.skipped += 1;
                continue;
            }
        };

        if moderation::exists(store, &title).await {
            result.skipped += 1;
            continue;
        }

        let event = Event::pending(
            title.clone(),
            fields.supervisor,
            fields.date,
            fields.time,
            fields.description,
            fields.category,
            fields.weekly,
            raw.create_time.clone(),
            raw.respondent_email.clone(),
        );

        match store.insert(&event).await {
            Ok(id) => {
                info!(title = %title, id = %id, "Event added");
                result.added += 1;
            }
            Err(e) => {
                warn!(title = %title, error = %e, "Failed to store submission");
                result.errors.push(format!("{}: {}", title, e));
            }
        }
    }

    info!(
        added = result.added,
        skipped = result.skipped,
        errors = result.errors.len(),
        "Ingestion batch complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn submission(pairs: &[(&str, &str)]) -> RawSubmission {
        RawSubmission {
            answers: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            create_time: "2025-02-20T08:00:00Z".to_string(),
            respondent_email: Some("kid@example.org".to_string()),
        }
    }

    #[test]
    fn extracts_mapped_answers() {
        let map = FormFieldMap::default();
        let raw = submission(&[
            ("46cfc9f8", "Chess Club"),
            ("03e3278b", "Mr. Karpov"),
            ("789c6989", "Yes"),
        ]);
        let fields = extract_fields(&raw, &map);
        assert_eq!(fields.title.as_deref(), Some("Chess Club"));
        assert_eq!(fields.supervisor.as_deref(), Some("Mr. Karpov"));
        assert_eq!(fields.weekly, Some(true));
        assert!(fields.date.is_none());
    }

    #[test]
    fn weekly_is_false_for_any_other_answer_and_none_when_absent() {
        let map = FormFieldMap::default();
        let raw = submission(&[("789c6989", "No")]);
        assert_eq!(extract_fields(&raw, &map).weekly, Some(false));

        let raw = submission(&[("789c6989", "yes")]);
        assert_eq!(extract_fields(&raw, &map).weekly, Some(false));

        let raw = submission(&[]);
        assert_eq!(extract_fields(&raw, &map).weekly, None);
    }

    #[test]
    fn custom_field_map_changes_extraction() {
        let map = FormFieldMap {
            title: "q1".to_string(),
            supervisor: "q2".to_string(),
            date: "q3".to_string(),
            time: "q4".to_string(),
            description: "q5".to_string(),
            category: "q6".to_string(),
            weekly: "q7".to_string(),
        };
        let raw = submission(&[("q1", "Robotics"), ("46cfc9f8", "ignored")]);
        assert_eq!(extract_fields(&raw, &map).title.as_deref(), Some("Robotics"));
    }
}
