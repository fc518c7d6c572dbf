use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{Announcement, SaveToFavoritesRequest, SavedAnnouncement, UpdateFavoriteNotesRequest},
    error::{AppError, Result},
};

pub async fn save(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<SaveToFavoritesRequest>,
) -> Result<Json<SavedAnnouncement>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let svc = &state.service_context;
    // The posting must exist; favoriting does not require it to be active.
    svc.announcement_service
        .get_or_fail(request.announcement_id)
        .await?;

    let favorite = svc
        .favorite_service
        .save(request.announcement_id, user_id, request.notes)
        .await?;

    Ok(Json(favorite))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, announcement_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>> {
    state
        .service_context
        .favorite_service
        .remove(announcement_id, user_id)
        .await?;

    Ok(Json(json!({ "removed": true })))
}

pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Announcement>>> {
    let announcements = state
        .service_context
        .favorite_service
        .list(user_id)
        .await?;

    Ok(Json(announcements))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<SavedAnnouncement>>> {
    let entries = state
        .service_context
        .favorite_service
        .list_entries(user_id)
        .await?;

    Ok(Json(entries))
}

pub async fn update_notes(
    State(state): State<AppState>,
    Path((user_id, announcement_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateFavoriteNotesRequest>,
) -> Result<Json<SavedAnnouncement>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let favorite = state
        .service_context
        .favorite_service
        .update_notes(announcement_id, user_id, request.notes)
        .await?;

    Ok(Json(favorite))
}

pub async fn count(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>> {
    let count = state.service_context.favorite_service.count(user_id).await?;

    Ok(Json(json!({ "count": count })))
}

pub async fn clear_all(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>> {
    let removed = state
        .service_context
        .favorite_service
        .clear_all(user_id)
        .await?;

    Ok(Json(json!({ "removed": removed })))
}
