use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domains::events::notify::{self, NotifyReport};
use crate::domains::events::triage::{self, TriageReport};
use crate::domains::events::{ingest, moderation, Event, IngestResult, ModerationOutcome};
use crate::server::app::AppState;
use crate::server::routes::ApiError;

/// POST /ingest
///
/// Pull everything the form currently holds and add the new
/// submissions as pending events. Always returns a batch summary;
/// per-item failures are inside `errors`, not an HTTP error.
pub async fn ingest_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<IngestResult>, ApiError> {
    let deps = &state.deps;
    let submissions = deps.form_source.fetch_responses().await?;
    let result = ingest::ingest(deps.store.as_ref(), &deps.field_map, &submissions).await;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub status: String,
}

/// GET /events?status=<s>
pub async fn list_events_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = moderation::list_by_status(state.deps.store.as_ref(), &query.status).await?;
    Ok(Json(events))
}

#[derive(Debug, Serialize)]
pub struct ModerationResponse {
    pub title: String,
    #[serde(flatten)]
    pub outcome: ModerationOutcome,
}

fn outcome_response(title: String, outcome: ModerationOutcome) -> Response {
    let status = match &outcome {
        ModerationOutcome::Applied { .. } => StatusCode::OK,
        ModerationOutcome::NotFound => StatusCode::NOT_FOUND,
        ModerationOutcome::AlreadyResolved { .. } => StatusCode::CONFLICT,
    };
    (status, Json(ModerationResponse { title, outcome })).into_response()
}

/// POST /events/{title}/approve
pub async fn approve_handler(
    Extension(state): Extension<AppState>,
    Path(title): Path<String>,
) -> Result<Response, ApiError> {
    let outcome =
        moderation::approve(state.deps.store.as_ref(), &title, moderation::SYSTEM_ACTOR).await?;
    Ok(outcome_response(title, outcome))
}

/// POST /events/{title}/decline
pub async fn decline_handler(
    Extension(state): Extension<AppState>,
    Path(title): Path<String>,
) -> Result<Response, ApiError> {
    let outcome =
        moderation::decline(state.deps.store.as_ref(), &title, moderation::SYSTEM_ACTOR).await?;
    Ok(outcome_response(title, outcome))
}

#[derive(Debug, Serialize)]
pub struct TriageResponse {
    pub triage: TriageReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotifyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_error: Option<String>,
}

/// POST /triage
///
/// Run model review over pending events, then email the submitters of
/// declined events. A notification failure never undoes the triage
/// result, so it is reported inside the body rather than as an HTTP
/// error.
pub async fn triage_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<TriageResponse>, ApiError> {
    let deps = state.deps.as_ref();
    let report = triage::run_triage(deps).await?;

    let (notifications, notify_error) = match notify::notify_declined(deps).await {
        Ok(report) => (Some(report), None),
        Err(e) => {
            tracing::warn!(error = %e, "Declined-event notification failed");
            (None, Some(e.to_string()))
        }
    };

    Ok(Json(TriageResponse {
        triage: report,
        notifications,
        notify_error,
    }))
}
