use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    access::AccessMatrix,
    domain::{Announcement, AnnouncementResponse, ResponseStatus, User},
    error::{AppError, Result},
    repository::ResponseRepository,
    service::{AnnouncementService, NotificationService},
};

/// The respond-to-announcement workflow: lifecycle guard, access-matrix
/// guard, one-response-per-user guard, then insert and notify.
pub struct ResponseService {
    repo: Arc<dyn ResponseRepository>,
    announcements: Arc<AnnouncementService>,
    matrix: Arc<AccessMatrix>,
    notifications: Arc<NotificationService>,
}

impl ResponseService {
    pub fn new(
        repo: Arc<dyn ResponseRepository>,
        announcements: Arc<AnnouncementService>,
        matrix: Arc<AccessMatrix>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            repo,
            announcements,
            matrix,
            notifications,
        }
    }

    /// Guards fail fast, before any write. The pre-insert uniqueness check
    /// can race with a concurrent respond; the schema's unique index is the
    /// second line of defense and the repository reports its violation as
    /// the same `AlreadyResponded`.
    pub async fn respond(
        &self,
        announcement: &Announcement,
        user: &User,
        message: String,
        attachment_path: Option<String>,
    ) -> Result<AnnouncementResponse> {
        self.announcements.validate(announcement)?;

        if !self.can_user_respond(user, announcement) {
            return Err(AppError::CannotRespond);
        }

        if self
            .has_already_responded(user.id, announcement.id)
            .await?
        {
            return Err(AppError::AlreadyResponded);
        }

        let response = AnnouncementResponse {
            id: Uuid::new_v4(),
            announcement_id: announcement.id,
            user_id: user.id,
            message,
            status: ResponseStatus::Pending,
            is_read: false,
            attachment_path,
            created_at: Utc::now(),
            updated_at: None,
        };

        let response = self.repo.create(response).await?;

        // Fire and forget: the response is committed either way.
        if let Err(e) = self
            .notifications
            .notify_new_response(&response, announcement)
            .await
        {
            tracing::warn!(response_id = %response.id, error = %e, "failed to notify new response");
        }

        Ok(response)
    }

    /// Sets the review status and stamps `updated_at`. Any status may follow
    /// any other; this is a moderation tool, not a strict state machine.
    pub async fn change_status(
        &self,
        response_id: Uuid,
        new_status: ResponseStatus,
    ) -> Result<AnnouncementResponse> {
        let mut response = self.get_or_fail(response_id).await?;
        response.status = new_status;
        response.updated_at = Some(Utc::now());

        let response = self.repo.update(response).await?;

        if let Some(announcement) = self.announcements.get(response.announcement_id).await? {
            if let Err(e) = self
                .notifications
                .notify_response_status_changed(&response, &announcement)
                .await
            {
                tracing::warn!(
                    response_id = %response.id,
                    error = %e,
                    "failed to notify status change"
                );
            }
        }

        Ok(response)
    }

    /// Tells everyone who responded that the posting was closed. Failures
    /// are logged per recipient; one bad row never blocks the rest.
    pub async fn notify_responders_of_closure(&self, announcement: &Announcement) -> Result<()> {
        let responses = self.repo.list_by_announcement(announcement.id).await?;
        for response in &responses {
            if let Err(e) = self
                .notifications
                .notify_announcement_closed(response, announcement)
                .await
            {
                tracing::warn!(
                    response_id = %response.id,
                    error = %e,
                    "failed to notify announcement closed"
                );
            }
        }

        Ok(())
    }

    /// Unset responder profile means no permission, never an error.
    pub fn can_user_respond(&self, user: &User, announcement: &Announcement) -> bool {
        match user.profil {
            Some(profil) => self
                .matrix
                .can_respond(profil, announcement.offer_user_profil),
            None => false,
        }
    }

    pub async fn has_already_responded(
        &self,
        user_id: Uuid,
        announcement_id: Uuid,
    ) -> Result<bool> {
        Ok(self
            .repo
            .find_by_announcement_and_user(announcement_id, user_id)
            .await?
            .is_some())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<AnnouncementResponse>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_or_fail(&self, id: Uuid) -> Result<AnnouncementResponse> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Réponse introuvable".to_string()))
    }

    pub async fn user_responses(&self, user_id: Uuid) -> Result<Vec<AnnouncementResponse>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn announcement_responses(
        &self,
        announcement_id: Uuid,
    ) -> Result<Vec<AnnouncementResponse>> {
        self.repo.list_by_announcement(announcement_id).await
    }

    pub async fn pending_responses(
        &self,
        announcement_id: Uuid,
    ) -> Result<Vec<AnnouncementResponse>> {
        let responses = self.repo.list_by_announcement(announcement_id).await?;
        Ok(responses.into_iter().filter(|r| r.is_pending()).collect())
    }

    pub async fn responses_by_status(
        &self,
        status: ResponseStatus,
    ) -> Result<Vec<AnnouncementResponse>> {
        self.repo.list_by_status(status).await
    }

    pub async fn count_announcement_responses(&self, announcement_id: Uuid) -> Result<i64> {
        self.repo.count_by_announcement(announcement_id).await
    }

    pub async fn count_user_responses(&self, user_id: Uuid) -> Result<i64> {
        self.repo.count_by_user(user_id).await
    }

    pub async fn mark_as_read(&self, response_id: Uuid) -> Result<AnnouncementResponse> {
        let mut response = self.get_or_fail(response_id).await?;
        response.is_read = true;
        self.repo.update(response).await
    }

    pub async fn mark_as_unread(&self, response_id: Uuid) -> Result<AnnouncementResponse> {
        let mut response = self.get_or_fail(response_id).await?;
        response.is_read = false;
        self.repo.update(response).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await
    }
}
