//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process can answer.
    pub status: &'static str,
    /// Crate name of the serving API.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Deadline the engine applies to each store query.
    pub query_timeout_ms: u64,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let query_timeout_ms =
        u64::try_from(state.engine.query_timeout().as_millis()).unwrap_or(u64::MAX);

    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        query_timeout_ms,
    })
}

/// Routes that bypass authentication.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
