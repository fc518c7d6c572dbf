use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{AnnouncementResponse, ResponseStatus},
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: ResponseStatus,
}

pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<Json<AnnouncementResponse>> {
    let response = state
        .service_context
        .response_service
        .change_status(id, request.status)
        .await?;

    Ok(Json(response))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnnouncementResponse>> {
    let response = state
        .service_context
        .response_service
        .mark_as_read(id)
        .await?;

    Ok(Json(response))
}

pub async fn mark_unread(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnnouncementResponse>> {
    let response = state
        .service_context
        .response_service
        .mark_as_unread(id)
        .await?;

    Ok(Json(response))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Value>> {
    let svc = &state.service_context;
    // 404 before delete so removing a missing response is visible.
    svc.response_service.get_or_fail(id).await?;
    svc.response_service.delete(id).await?;

    Ok(Json(json!({ "deleted": true })))
}

pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AnnouncementResponse>>> {
    let responses = state
        .service_context
        .response_service
        .user_responses(user_id)
        .await?;

    Ok(Json(responses))
}

pub async fn count_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>> {
    let count = state
        .service_context
        .response_service
        .count_user_responses(user_id)
        .await?;

    Ok(Json(json!({ "count": count })))
}
