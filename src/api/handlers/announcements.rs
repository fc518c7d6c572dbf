use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{
        Announcement, AnnouncementResponse, CreateAnnouncementRequest,
        RespondToAnnouncementRequest, UpdateAnnouncementRequest,
    },
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListAnnouncementsQuery {
    /// When set, results are filtered to what this user's profile may see.
    pub viewer_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementView {
    #[serde(flatten)]
    pub announcement: Announcement,
    pub is_expired: bool,
    pub needs_renewal: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAnnouncementsQuery>,
) -> Result<Json<Vec<Announcement>>> {
    let svc = &state.service_context;

    let announcements = match params.viewer_id {
        Some(viewer_id) => {
            let viewer = svc
                .user_repo
                .find_by_id(viewer_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))?;

            match viewer.profil {
                Some(profil) => svc.announcement_service.list_visible_to(profil).await?,
                // No profile set, nothing is visible.
                None => Vec::new(),
            }
        }
        None => {
            let limit = params.limit.unwrap_or(20).min(100);
            let offset = params.offset.unwrap_or(0);
            svc.announcement_service.list(limit, offset).await?
        }
    };

    Ok(Json(announcements))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<Json<Announcement>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let announcement = state
        .service_context
        .announcement_service
        .create(request)
        .await?;

    Ok(Json(announcement))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnnouncementView>> {
    let svc = &state.service_context;
    let announcement = svc.announcement_service.get_or_fail(id).await?;

    // Best effort, never fails the page view.
    svc.announcement_service.increment_view_count(id).await;

    let is_expired = announcement.is_expired();
    let needs_renewal = svc.announcement_service.needs_renewal(&announcement);

    Ok(Json(AnnouncementView {
        announcement,
        is_expired,
        needs_renewal,
    }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let announcement = state
        .service_context
        .announcement_service
        .update(id, request)
        .await?;

    Ok(Json(announcement))
}

/// Closes the posting and tells everyone who responded.
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>> {
    let svc = &state.service_context;
    let announcement = svc.announcement_service.close(id).await?;
    svc.response_service
        .notify_responders_of_closure(&announcement)
        .await?;

    Ok(Json(announcement))
}

pub async fn renew(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>> {
    let announcement = state.service_context.announcement_service.renew(id).await?;

    Ok(Json(announcement))
}

pub async fn respond(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RespondToAnnouncementRequest>,
) -> Result<Json<AnnouncementResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let svc = &state.service_context;
    let announcement = svc.announcement_service.get_or_fail(id).await?;
    let user = svc
        .user_repo
        .find_by_id(request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))?;

    let response = svc
        .response_service
        .respond(&announcement, &user, request.message, request.attachment_path)
        .await?;

    Ok(Json(response))
}

pub async fn list_responses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AnnouncementResponse>>> {
    let responses = state
        .service_context
        .response_service
        .announcement_responses(id)
        .await?;

    Ok(Json(responses))
}

pub async fn list_pending_responses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AnnouncementResponse>>> {
    let responses = state
        .service_context
        .response_service
        .pending_responses(id)
        .await?;

    Ok(Json(responses))
}
