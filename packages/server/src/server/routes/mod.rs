pub mod events;
pub mod health;

pub use events::{
    approve_handler, decline_handler, ingest_handler, list_events_handler, triage_handler,
};
pub use health::health_handler;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::common::EventsError;

/// Maps the domain error taxonomy onto HTTP statuses. Upstream
/// dependency failures are gateway errors; a missing moderation target
/// is 404; a store conflict is 409.
pub struct ApiError(pub EventsError);

impl From<EventsError> for ApiError {
    fn from(e: EventsError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EventsError::NotFound(_) => StatusCode::NOT_FOUND,
            EventsError::StoreConflict(_) => StatusCode::CONFLICT,
            EventsError::SourceUnavailable(_)
            | EventsError::StoreUnavailable(_)
            | EventsError::AssistantUnavailable(_)
            | EventsError::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
