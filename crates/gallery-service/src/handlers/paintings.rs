//! Painting catalog handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use gallery_core::{Painting, PaintingId, PaintingInput};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Confirmation body for mutations that return no record.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// List every painting, newest first.
pub async fn list_paintings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Painting>>, ApiError> {
    Ok(Json(state.catalog.list_paintings().await?))
}

/// Get one painting.
pub async fn get_painting(
    State(state): State<Arc<AppState>>,
    ApiPath(painting_id): ApiPath<PaintingId>,
) -> Result<Json<Painting>, ApiError> {
    Ok(Json(state.catalog.get_painting(painting_id).await?))
}

/// Add a painting.
pub async fn create_painting(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<PaintingInput>,
) -> Result<(StatusCode, Json<Painting>), ApiError> {
    let painting = state.catalog.create_painting(&body).await?;
    Ok((StatusCode::CREATED, Json(painting)))
}

/// Overwrite a painting.
pub async fn update_painting(
    State(state): State<Arc<AppState>>,
    ApiPath(painting_id): ApiPath<PaintingId>,
    ApiJson(body): ApiJson<PaintingInput>,
) -> Result<Json<Painting>, ApiError> {
    Ok(Json(state.catalog.update_painting(painting_id, &body).await?))
}

/// Remove a painting.
pub async fn delete_painting(
    State(state): State<Arc<AppState>>,
    ApiPath(painting_id): ApiPath<PaintingId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.catalog.delete_painting(painting_id).await?;
    Ok(Json(MessageResponse {
        message: "Painting deleted successfully".to_string(),
    }))
}
