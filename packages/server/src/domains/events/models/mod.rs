pub mod event;

pub use event::{titles_match, Event, EventStatus, FormFieldMap, RawSubmission};
