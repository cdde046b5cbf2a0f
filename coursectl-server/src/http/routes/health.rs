//! Liveness endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Plain-text liveness banner served at `/`
pub const LIVENESS_BANNER: &str = "Course management server is running!";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /
async fn liveness() -> &'static str {
    LIVENESS_BANNER
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
}
