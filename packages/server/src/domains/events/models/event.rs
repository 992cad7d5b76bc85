use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw form submission, already flattened to question-id → first
/// text answer by the form source adapter.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub answers: HashMap<String, String>,
    pub create_time: String,
    pub respondent_email: Option<String>,
}

/// Question-id mapping for the submission form. Defaults match the
/// current form revision; override via config when the form changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFieldMap {
    pub title: String,
    pub supervisor: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub category: String,
    pub weekly: String,
}

impl Default for FormFieldMap {
    fn default() -> Self {
        Self {
            title: "46cfc9f8".to_string(),
            supervisor: "03e3278b".to_string(),
            date: "2171d758".to_string(),
            time: "0db76540".to_string(),
            description: "5235d67f".to_string(),
            category: "6082cc62".to_string(),
            weekly: "789c6989".to_string(),
        }
    }
}

/// Moderation status. Transitions are monotone: `pending` moves to
/// exactly one of the terminal states and never back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Approved,
    Declined,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Pending => write!(f, "pending"),
            EventStatus::Approved => write!(f, "approved"),
            EventStatus::Declined => write!(f, "declined"),
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending" => Ok(EventStatus::Pending),
            "approved" => Ok(EventStatus::Approved),
            "declined" => Ok(EventStatus::Declined),
            _ => Err(anyhow::anyhow!("Invalid event status: {}", s)),
        }
    }
}

/// Event - a moderated calendar event persisted in the document store.
///
/// Field names are the wire contract other integrations read; keep
/// them stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned id; absent until insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,
    /// Case-folded copy persisted alongside the raw title so a future
    /// case-insensitive lookup needs no migration.
    #[serde(rename = "title_lower")]
    pub title_lower: String,

    pub supervisor: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub weekly: Option<bool>,

    pub submit_time: String,
    pub respondent_email: Option<String>,

    pub status: EventStatus,

    // Audit fields, set iff the corresponding transition happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined_at: Option<String>,
}

impl Event {
    /// Build a pending event from extracted submission fields.
    #[allow(clippy::too_many_arguments)]
    pub fn pending(
        title: String,
        supervisor: Option<String>,
        date: Option<String>,
        time: Option<String>,
        description: Option<String>,
        category: Option<String>,
        weekly: Option<bool>,
        submit_time: String,
        respondent_email: Option<String>,
    ) -> Self {
        let title_lower = title.to_lowercase();
        Self {
            id: None,
            title,
            title_lower,
            supervisor,
            date,
            time,
            description,
            category,
            weekly,
            submit_time,
            respondent_email,
            status: EventStatus::Pending,
            approved_by: None,
            approved_at: None,
            declined_by: None,
            declined_at: None,
        }
    }

    /// Apply a terminal transition in memory, stamping audit fields.
    /// The store adapter mirrors this as a field patch.
    pub fn apply_transition(&mut self, status: EventStatus, actor: &str, at: DateTime<Utc>) {
        self.status = status;
        match status {
            EventStatus::Approved => {
                self.approved_by = Some(actor.to_string());
                self.approved_at = Some(at.to_rfc3339());
            }
            EventStatus::Declined => {
                self.declined_by = Some(actor.to_string());
                self.declined_at = Some(at.to_rfc3339());
            }
            EventStatus::Pending => {}
        }
    }

    /// One-line summary used in model prompts.
    pub fn summary(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\nDate: {}\nTime: {}\nRespondent Email: {}\nCategory: {}\nSupervisor: {}\nIs It Weekly?: {}",
            self.title,
            self.description.as_deref().unwrap_or("-"),
            self.date.as_deref().unwrap_or("-"),
            self.time.as_deref().unwrap_or("-"),
            self.respondent_email.as_deref().unwrap_or("-"),
            self.category.as_deref().unwrap_or("-"),
            self.supervisor.as_deref().unwrap_or("-"),
            self.weekly.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
        )
    }
}

/// Title comparison used for dedup and moderation lookup.
///
/// The stored record carries both `title` and `title_lower`; lookups
/// compare the raw title exactly (`case_fold = false`) today, and the
/// flag pins that choice in tests so flipping it is a deliberate act.
pub fn titles_match(a: &str, b: &str, case_fold: bool) -> bool {
    if case_fold {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [EventStatus::Pending, EventStatus::Approved, EventStatus::Declined] {
            assert_eq!(EventStatus::from_str(&status.to_string()).unwrap(), status);
        }
        assert!(EventStatus::from_str("archived").is_err());
    }

    #[test]
    fn title_matching_is_case_sensitive_by_default() {
        assert!(titles_match("Chess Club", "Chess Club", false));
        assert!(!titles_match("Chess Club", "chess club", false));
        assert!(titles_match("Chess Club", "chess club", true));
    }

    #[test]
    fn pending_event_folds_title_and_has_no_audit_fields() {
        let event = Event::pending(
            "Bake Sale".to_string(),
            None,
            None,
            None,
            None,
            None,
            None,
            "2025-01-01T00:00:00Z".to_string(),
            None,
        );
        assert_eq!(event.title_lower, "bake sale");
        assert_eq!(event.status, EventStatus::Pending);
        assert!(event.approved_by.is_none());
        assert!(event.declined_at.is_none());
    }

    #[test]
    fn transition_stamps_matching_audit_fields_only() {
        let mut event = Event::pending(
            "Bake Sale".to_string(),
            None,
            None,
            None,
            None,
            None,
            None,
            "2025-01-01T00:00:00Z".to_string(),
            None,
        );
        let now = Utc::now();
        event.apply_transition(EventStatus::Approved, "system", now);
        assert_eq!(event.status, EventStatus::Approved);
        assert_eq!(event.approved_by.as_deref(), Some("system"));
        assert!(event.approved_at.is_some());
        assert!(event.declined_by.is_none());
    }

    #[test]
    fn wire_field_names_are_stable() {
        let event = Event::pending(
            "Bake Sale".to_string(),
            None,
            None,
            None,
            None,
            None,
            Some(true),
            "2025-01-01T00:00:00Z".to_string(),
            Some("kid@example.org".to_string()),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["title"], "Bake Sale");
        assert_eq!(json["title_lower"], "bake sale");
        assert_eq!(json["submitTime"], "2025-01-01T00:00:00Z");
        assert_eq!(json["respondentEmail"], "kid@example.org");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["weekly"], true);
        assert!(json.get("approvedBy").is_none());
    }
}
