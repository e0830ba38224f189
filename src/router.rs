//! HTTP router
//!
//! Routes, request-id middleware and tower layers shared by the server binary
//! and the integration tests.

use crate::api;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Header carrying the correlation id of a request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Health report, including the sync limits in effect
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" when the process answers
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Items synchronized concurrently per batch
    pub max_concurrency: usize,
    /// Largest accepted batch
    pub max_batch_size: usize,
}

/// Tag every request with an id, reusing the caller's `x-request-id` when
/// it sends one, and echo it on the response
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let mut response = next
        .run(request)
        .instrument(info_span!("request", request_id = %request_id))
        .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis(),
        "Handled request"
    );
    response
}

/// Build the application router over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/inventory-sync", post(api::sync_inventory))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /api/health - Liveness plus the active sync limits
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let options = state.orchestrator.options();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        max_concurrency: options.max_concurrency,
        max_batch_size: options.max_batch_size,
    })
}
