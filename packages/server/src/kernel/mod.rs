pub mod adapters;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use adapters::{FirestoreEventStore, GeminiModel, GoogleFormSource, LogNotifier, MailgunNotifier};
pub use deps::ServerDeps;
pub use traits::{DecisionModel, EventStore, FormSource, Notifier};
