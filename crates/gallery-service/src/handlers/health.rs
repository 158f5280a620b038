//! Liveness and health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Plain-text liveness message served at `/api`.
pub const API_BANNER: &str = "🎨 Online Gallery API is running!";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Database reachability: `"ok"` or `"unavailable"`.
    pub database: String,
}

/// API liveness endpoint.
pub async fn api_root() -> &'static str {
    API_BANNER
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "unavailable"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        service: "gallery".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
