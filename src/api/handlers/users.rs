use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{CreateUserRequest, Notification, User},
    error::{AppError, Result},
};

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if state
        .service_context
        .user_repo
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Un compte existe déjà avec cette adresse e-mail".to_string(),
        ));
    }

    let user = state.service_context.user_repo.create(request).await?;

    Ok(Json(user))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<User>> {
    let user = state
        .service_context
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))?;

    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct NotificationsQuery {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
}

pub async fn notifications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<NotificationsQuery>,
) -> Result<Json<Vec<Notification>>> {
    let svc = &state.service_context;

    let notifications = if params.unread_only.unwrap_or(false) {
        svc.notification_service.unread(user_id).await?
    } else {
        let limit = params.limit.unwrap_or(10).min(100);
        svc.notification_service.recent(user_id, limit).await?
    };

    Ok(Json(notifications))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path((_user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>> {
    state
        .service_context
        .notification_service
        .mark_read(id)
        .await?;

    Ok(Json(json!({ "read": true })))
}

pub async fn mark_notifications_read(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>> {
    let marked = state
        .service_context
        .notification_service
        .mark_all_read(user_id)
        .await?;

    Ok(Json(json!({ "marked": marked })))
}
