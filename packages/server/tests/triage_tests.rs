//! Integration tests for model-assisted triage and declined-event
//! notification.

mod common;

use crate::common::{pending_event, TestHarness};
use server_core::domains::events::models::EventStatus;
use server_core::domains::events::moderation::{self, SYSTEM_ACTOR};
use server_core::domains::events::{notify, triage};

#[tokio::test]
async fn triage_applies_model_decisions() {
    let ctx = TestHarness::new(
        Vec::new(),
        vec!["Approved\nChess Club\nDeclined:\nCasino Night\n".to_string()],
    );
    ctx.store.seed(pending_event("Chess Club"));
    ctx.store.seed(pending_event("Casino Night"));

    let report = triage::run_triage(&ctx.deps).await.unwrap();
    assert_eq!(report.approved, vec!["Chess Club"]);
    assert_eq!(report.declined, vec!["Casino Night"]);
    assert!(report.errors.is_empty());

    let stored = ctx.store.all();
    let chess = stored.iter().find(|e| e.title == "Chess Club").unwrap();
    let casino = stored.iter().find(|e| e.title == "Casino Night").unwrap();
    assert_eq!(chess.status, EventStatus::Approved);
    assert_eq!(chess.approved_by.as_deref(), Some("system"));
    assert_eq!(casino.status, EventStatus::Declined);
}

#[tokio::test]
async fn malformed_model_response_applies_nothing() {
    let ctx = TestHarness::new(
        Vec::new(),
        vec!["These all look fine to me, carry on!".to_string()],
    );
    ctx.store.seed(pending_event("Chess Club"));

    let report = triage::run_triage(&ctx.deps).await.unwrap();
    assert!(report.approved.is_empty());
    assert!(report.declined.is_empty());

    assert_eq!(ctx.store.all()[0].status, EventStatus::Pending);
}

#[tokio::test]
async fn triage_without_pending_events_skips_the_model() {
    let ctx = TestHarness::new(Vec::new(), vec!["unused".to_string()]);

    let report = triage::run_triage(&ctx.deps).await.unwrap();
    assert!(report.approved.is_empty());
    assert!(report.declined.is_empty());
    assert!(ctx.model.prompts().is_empty());
}

#[tokio::test]
async fn unknown_titles_from_the_model_are_isolated() {
    let ctx = TestHarness::new(
        Vec::new(),
        vec!["Approved\nChess Club\nMade Up Event\n".to_string()],
    );
    ctx.store.seed(pending_event("Chess Club"));

    let report = triage::run_triage(&ctx.deps).await.unwrap();
    assert_eq!(report.approved, vec!["Chess Club"]);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Made Up Event"));
}

#[tokio::test]
async fn model_outage_surfaces_as_error() {
    let ctx = TestHarness::new(Vec::new(), vec!["unused".to_string()]);
    ctx.store.seed(pending_event("Chess Club"));
    ctx.model.fail_completions(true);

    assert!(triage::run_triage(&ctx.deps).await.is_err());
    assert_eq!(ctx.store.all()[0].status, EventStatus::Pending);
}

#[tokio::test]
async fn triage_prompt_contains_pending_titles() {
    let ctx = TestHarness::new(Vec::new(), vec!["Approved\n\nDeclined:\n".to_string()]);
    ctx.store.seed(pending_event("Chess Club"));

    triage::run_triage(&ctx.deps).await.unwrap();

    let prompts = ctx.model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Chess Club"));
}

#[tokio::test]
async fn declined_events_trigger_emails() {
    let ctx = TestHarness::new(
        Vec::new(),
        vec![
            "submitter@example.org\nAbout your event submission\n<html>Please revise.</html>\n"
                .to_string(),
        ],
    );
    ctx.store.seed(pending_event("Casino Night"));
    moderation::decline(ctx.store.as_ref(), "Casino Night", SYSTEM_ACTOR)
        .await
        .unwrap();

    let report = notify::notify_declined(&ctx.deps).await.unwrap();
    assert_eq!(report.sent, 1);
    assert_eq!(report.failed, 0);

    let sent = ctx.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "submitter@example.org");
    assert_eq!(sent[0].subject, "About your event submission");
    assert!(sent[0].html.contains("Please revise."));
}

#[tokio::test]
async fn delivery_failure_is_counted_not_fatal() {
    let ctx = TestHarness::new(
        Vec::new(),
        vec!["submitter@example.org\nSubject\n<html>body</html>\n".to_string()],
    );
    ctx.store.seed(pending_event("Casino Night"));
    moderation::decline(ctx.store.as_ref(), "Casino Night", SYSTEM_ACTOR)
        .await
        .unwrap();
    ctx.notifier.fail_sends(true);

    let report = notify::notify_declined(&ctx.deps).await.unwrap();
    assert_eq!(report.sent, 0);
    assert_eq!(report.failed, 1);

    // The moderation result stands regardless of delivery.
    assert_eq!(ctx.store.all()[0].status, EventStatus::Declined);
}

#[tokio::test]
async fn no_declined_events_means_no_model_call_and_no_mail() {
    let ctx = TestHarness::new(Vec::new(), vec!["unused".to_string()]);
    ctx.store.seed(pending_event("Chess Club"));

    let report = notify::notify_declined(&ctx.deps).await.unwrap();
    assert_eq!(report.sent, 0);
    assert!(ctx.model.prompts().is_empty());
    assert!(ctx.notifier.sent().is_empty());
}
