use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{Announcement, AnnouncementResponse, NewNotification, Notification},
    error::Result,
    repository::NotificationRepository,
};

/// In-app notification sink for workflow events. Callers treat emission as
/// fire-and-forget: a failure here must never roll back the domain write
/// that triggered it.
pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.repo.create(notification).await
    }

    /// Notifies the posting's owner of a new response. Announcements do not
    /// yet carry a poster relation, so there is no owner to resolve; this
    /// logs the event and skips rather than guessing one.
    pub async fn notify_new_response(
        &self,
        response: &AnnouncementResponse,
        announcement: &Announcement,
    ) -> Result<()> {
        tracing::debug!(
            announcement_id = %announcement.id,
            response_id = %response.id,
            "announcement has no owner relation; skipping new-response notification"
        );

        Ok(())
    }

    /// Notifies the responder that their application status changed.
    pub async fn notify_response_status_changed(
        &self,
        response: &AnnouncementResponse,
        announcement: &Announcement,
    ) -> Result<()> {
        self.repo
            .create(NewNotification {
                user_id: response.user_id,
                title: "Statut de votre candidature mis à jour".to_string(),
                message: format!(
                    "Votre réponse à l'annonce \"{}\" est maintenant {}.",
                    announcement.title,
                    response.status.label().to_lowercase()
                ),
                notification_type: "response".to_string(),
                action_url: Some(format!("/mes-candidatures/{}", response.id)),
                action_label: Some("Voir les détails".to_string()),
                metadata: Some(json!({
                    "announcement_id": announcement.id,
                    "response_id": response.id,
                    "new_status": response.status.as_str(),
                    "announcement_title": announcement.title,
                })),
            })
            .await?;

        Ok(())
    }

    /// Notifies a responder that the posting they answered was closed.
    pub async fn notify_announcement_closed(
        &self,
        response: &AnnouncementResponse,
        announcement: &Announcement,
    ) -> Result<()> {
        self.repo
            .create(NewNotification {
                user_id: response.user_id,
                title: "Annonce fermée".to_string(),
                message: format!(
                    "L'annonce \"{}\" à laquelle vous avez répondu a été fermée.",
                    announcement.title
                ),
                notification_type: "announcement".to_string(),
                action_url: Some(format!("/annonces/{}", announcement.id)),
                action_label: Some("Voir l'annonce".to_string()),
                metadata: Some(json!({
                    "announcement_id": announcement.id,
                    "response_id": response.id,
                    "announcement_title": announcement.title,
                })),
            })
            .await?;

        Ok(())
    }

    pub async fn unread(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        self.repo.list_unread_by_user(user_id).await
    }

    pub async fn recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<Notification>> {
        self.repo.list_recent_by_user(user_id, limit).await
    }

    pub async fn count_unread(&self, user_id: Uuid) -> Result<i64> {
        self.repo.count_unread_by_user(user_id).await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<()> {
        self.repo.mark_read(id).await
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64> {
        self.repo.mark_all_read_by_user(user_id).await
    }

    pub async fn cleanup_old(&self, days: i64) -> Result<u64> {
        self.repo.delete_older_than_days(days).await
    }
}
