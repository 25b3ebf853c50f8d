//! Route configuration and setup.
//!
//! Health checks live in [health](health).

mod health;

use crate::error::HttpAppError;
use crate::handlers::photo_upload::upload_photo;
use crate::middleware::{request_id_middleware, RequestId};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use barnlog_core::AppError;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    let upload_body_limit =
        usize::try_from(state.limits.max_request_bytes()).unwrap_or(usize::MAX);
    tracing::info!(
        max_request_bytes = state.limits.max_request_bytes(),
        max_photo_bytes = state.limits.max_photo_bytes,
        "Upload body limits configured"
    );

    let upload_routes = Router::new()
        .route("/uploads/photos", post(upload_photo))
        .layer(DefaultBodyLimit::max(upload_body_limit));

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .merge(upload_routes)
        .route("/healthz", get(health::liveness_check))
        .route("/readyz", get(health::readiness_check))
        .fallback(not_found)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

async fn not_found() -> HttpAppError {
    HttpAppError(AppError::NotFound("no route".to_string()))
}
