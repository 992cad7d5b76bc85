//! Model-assisted review of pending events.
//!
//! The decision model is asked to partition pending events into
//! approved and declined titles, one per line under two section
//! markers. That output is untrusted, loosely structured text: the
//! parser is a small line scanner with an explicit section state, and
//! anything it does not recognize is ignored. Malformed output means
//! zero transitions, never a crash.

use serde::Serialize;
use tracing::warn;

use crate::common::EventsError;
use crate::domains::events::models::Event;
use crate::domains::events::moderation::{self, ModerationOutcome, SYSTEM_ACTOR};
use crate::kernel::ServerDeps;

/// Marker line opening the approved-titles section.
pub const APPROVED_MARKER: &str = "Approved";
/// Marker line opening the declined-titles section.
pub const DECLINED_MARKER: &str = "Declined:";

/// Parsed partition of titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decisions {
    pub approved: Vec<String>,
    pub declined: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Approved,
    Declined,
}

/// Parse the model's review response into title lists.
///
/// Line-oriented: a line equal to a marker (after trimming) toggles
/// the section; non-empty lines inside a section are titles; blank
/// lines and lines outside any section are skipped.
pub fn parse_decisions(response: &str) -> Decisions {
    let mut decisions = Decisions::default();
    let mut section = Section::Outside;

    for line in response.lines() {
        let line = line.trim();

        if line == APPROVED_MARKER {
            section = Section::Approved;
            continue;
        }
        if line == DECLINED_MARKER {
            section = Section::Declined;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match section {
            Section::Approved => decisions.approved.push(line.to_string()),
            Section::Declined => decisions.declined.push(line.to_string()),
            Section::Outside => {}
        }
    }

    decisions
}

/// Build the review prompt over the pending events.
pub fn build_review_prompt(pending: &[Event]) -> String {
    let events_text = pending
        .iter()
        .map(|e| e.summary())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a high school vice principal. Decide whether each of the \
         following submitted events is appropriate to publish on the \
         school-wide calendar. Reject anything inaccurate or inappropriate. \
         Respond with the line `{approved}` followed by the approved event \
         titles, one per line (leave one blank line if none), then the line \
         `{declined}` followed by the declined titles the same way. Respond \
         with nothing else.\n\nHere are the pending events to review:\n{events}",
        approved = APPROVED_MARKER,
        declined = DECLINED_MARKER,
        events = events_text,
    )
}

/// Summary of one triage run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TriageReport {
    pub approved: Vec<String>,
    pub declined: Vec<String>,
    pub errors: Vec<String>,
}

/// Review all pending events with the decision model and apply the
/// resulting transitions with the `system` actor.
///
/// Per-title failures are isolated: one bad transition never aborts
/// the rest of the batch.
pub async fn run_triage(deps: &ServerDeps) -> Result<TriageReport, EventsError> {
    let pending = moderation::list_by_status(deps.store.as_ref(), "pending").await?;
    if pending.is_empty() {
        return Ok(TriageReport::default());
    }

    let prompt = build_review_prompt(&pending);
    let response = deps.model.complete(&prompt).await?;
    let decisions = parse_decisions(&response);

    let mut report = TriageReport::default();
    apply(deps, &decisions.approved, true, &mut report).await;
    apply(deps, &decisions.declined, false, &mut report).await;
    Ok(report)
}

async fn apply(deps: &ServerDeps, titles: &[String], approve: bool, report: &mut TriageReport) {
    for title in titles {
        let result = if approve {
            moderation::approve(deps.store.as_ref(), title, SYSTEM_ACTOR).await
        } else {
            moderation::decline(deps.store.as_ref(), title, SYSTEM_ACTOR).await
        };

        match result {
            Ok(ModerationOutcome::Applied { .. }) => {
                if approve {
                    report.approved.push(title.clone());
                } else {
                    report.declined.push(title.clone());
                }
            }
            Ok(ModerationOutcome::NotFound) => {
                report
                    .errors
                    .push(format!("{}: no matching event", title));
            }
            Ok(ModerationOutcome::AlreadyResolved { status }) => {
                report
                    .errors
                    .push(format!("{}: already {}", title, status));
            }
            Err(e) => {
                warn!(title = %title, error = %e, "Transition failed during triage");
                report.errors.push(format!("{}: {}", title, e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_sections() {
        let response = "Approved\nChess Club\nBake Sale\nDeclined:\nCasino Night\n";
        let decisions = parse_decisions(response);
        assert_eq!(decisions.approved, vec!["Chess Club", "Bake Sale"]);
        assert_eq!(decisions.declined, vec!["Casino Night"]);
    }

    #[test]
    fn tolerates_blank_lines_and_trailing_whitespace() {
        let response = "Approved\n\n  Chess Club  \n\nDeclined:\n\n  Casino Night\t\n";
        let decisions = parse_decisions(response);
        assert_eq!(decisions.approved, vec!["Chess Club"]);
        assert_eq!(decisions.declined, vec!["Casino Night"]);
    }

    #[test]
    fn no_markers_means_no_decisions() {
        let decisions = parse_decisions("I think these all look great!\nCheers.");
        assert!(decisions.approved.is_empty());
        assert!(decisions.declined.is_empty());
    }

    #[test]
    fn lines_before_any_marker_are_ignored() {
        let response = "Here is my review:\nSomething\nApproved\nChess Club";
        let decisions = parse_decisions(response);
        assert_eq!(decisions.approved, vec!["Chess Club"]);
        assert!(decisions.declined.is_empty());
    }

    #[test]
    fn missing_section_yields_empty_list() {
        let decisions = parse_decisions("Declined:\nCasino Night");
        assert!(decisions.approved.is_empty());
        assert_eq!(decisions.declined, vec!["Casino Night"]);
    }

    #[test]
    fn marker_must_match_exactly_after_trim() {
        // "Approved:" (with colon) is not the approved marker; it is
        // an ordinary line outside any section.
        let decisions = parse_decisions("Approved:\nChess Club");
        assert!(decisions.approved.is_empty());
    }

    #[test]
    fn review_prompt_names_markers_and_events() {
        let event = Event::pending(
            "Chess Club".to_string(),
            None,
            None,
            None,
            None,
            None,
            None,
            "2025-02-20T08:00:00Z".to_string(),
            None,
        );
        let prompt = build_review_prompt(&[event]);
        assert!(prompt.contains("Chess Club"));
        assert!(prompt.contains(APPROVED_MARKER));
        assert!(prompt.contains(DECLINED_MARKER));
    }
}
