//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    approve_handler, decline_handler, health_handler, ingest_handler, list_events_handler,
    triage_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router.
///
/// All external clients live inside `deps`, constructed once at
/// process start; handlers reach them through the kernel traits.
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let app_state = AppState { deps };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        // The form sync was historically triggered by a GET; keep both.
        .route("/ingest", post(ingest_handler).get(ingest_handler))
        .route("/events", get(list_events_handler))
        .route("/events/:title/approve", post(approve_handler))
        .route("/events/:title/decline", post(decline_handler))
        .route("/triage", post(triage_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
