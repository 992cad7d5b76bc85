pub mod ingest;
pub mod models;
pub mod moderation;
pub mod notify;
pub mod triage;

// Re-export the types route handlers and tests reach for
pub use ingest::IngestResult;
pub use models::{Event, EventStatus, FormFieldMap, RawSubmission};
pub use moderation::ModerationOutcome;
pub use triage::{Decisions, TriageReport};
