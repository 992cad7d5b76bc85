//! Shared test harness: wires ServerDeps from the in-memory mocks so
//! tests can drive the real pipeline without any live service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use server_core::domains::events::models::{Event, FormFieldMap, RawSubmission};
use server_core::kernel::test_dependencies::{
    MemoryEventStore, RecordingNotifier, ScriptedModel, StaticFormSource,
};
use server_core::kernel::ServerDeps;

pub struct TestHarness {
    pub deps: Arc<ServerDeps>,
    pub store: Arc<MemoryEventStore>,
    pub source: Arc<StaticFormSource>,
    pub notifier: Arc<RecordingNotifier>,
    pub model: Arc<ScriptedModel>,
}

impl TestHarness {
    /// Harness with the given form submissions and scripted model
    /// responses; everything else starts empty.
    pub fn new(submissions: Vec<RawSubmission>, responses: Vec<String>) -> Self {
        let store = Arc::new(MemoryEventStore::new());
        let source = Arc::new(StaticFormSource::new(submissions));
        let notifier = Arc::new(RecordingNotifier::new());
        let model = Arc::new(ScriptedModel::new(responses));

        let deps = Arc::new(ServerDeps::new(
            source.clone(),
            store.clone(),
            notifier.clone(),
            model.clone(),
            FormFieldMap::default(),
        ));

        Self {
            deps,
            store,
            source,
            notifier,
            model,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// A submission answering only the title question.
pub fn submission(title: &str) -> RawSubmission {
    submission_with(&[("46cfc9f8", title)])
}

/// A submission with explicit question-id answers.
pub fn submission_with(pairs: &[(&str, &str)]) -> RawSubmission {
    let answers: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RawSubmission {
        answers,
        create_time: "2025-02-20T08:00:00Z".to_string(),
        respondent_email: Some("submitter@example.org".to_string()),
    }
}

/// A pending event ready to seed straight into the store.
pub fn pending_event(title: &str) -> Event {
    Event::pending(
        title.to_string(),
        Some("Ms. Frizzle".to_string()),
        Some("2025-03-01".to_string()),
        Some("15:30".to_string()),
        Some("After-school activity".to_string()),
        Some("Club".to_string()),
        Some(false),
        "2025-02-20T08:00:00Z".to_string(),
        Some("submitter@example.org".to_string()),
    )
}
