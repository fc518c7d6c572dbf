use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    access::AccessMatrix,
    domain::{
        Announcement, AnnouncementStatus, CreateAnnouncementRequest, ProfileType,
        UpdateAnnouncementRequest, ANNOUNCEMENT_VALIDITY_DAYS, RENEWAL_WINDOW_DAYS,
    },
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

/// Lifecycle of a posting: creation defaults, status transitions, lazy
/// expiration, renewal and view bookkeeping.
///
/// There is no expiration sweep. `Expired` is derived from `expires_at` on
/// every read; the persisted status only changes through explicit actions.
pub struct AnnouncementService {
    repo: Arc<dyn AnnouncementRepository>,
    matrix: Arc<AccessMatrix>,
}

impl AnnouncementService {
    pub fn new(repo: Arc<dyn AnnouncementRepository>, matrix: Arc<AccessMatrix>) -> Self {
        Self { repo, matrix }
    }

    /// Creates a posting; expiry defaults to 90 days out, status to Active.
    pub async fn create(&self, request: CreateAnnouncementRequest) -> Result<Announcement> {
        let now = Utc::now();
        let announcement = Announcement {
            id: Uuid::new_v4(),
            offer_type: request.offer_type,
            title: request.title,
            description: request.description,
            offer_user_profil: request.offer_user_profil,
            position_sought: request.position_sought,
            league_concerned: request.league_concerned,
            location: request.location,
            offer_status: AnnouncementStatus::Active,
            view_count: 0,
            profil: request.profil,
            created_at: now,
            updated_at: now,
            expires_at: request
                .expires_at
                .unwrap_or_else(Announcement::default_expiration),
        };

        self.repo.create(announcement).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Announcement>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_or_fail(&self, id: Uuid) -> Result<Announcement> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Annonce introuvable".to_string()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAnnouncementRequest,
    ) -> Result<Announcement> {
        let mut announcement = self.get_or_fail(id).await?;

        if let Some(title) = request.title {
            announcement.title = title;
        }
        if let Some(description) = request.description {
            announcement.description = description;
        }
        if let Some(position_sought) = request.position_sought {
            announcement.position_sought = position_sought;
        }
        if let Some(league_concerned) = request.league_concerned {
            announcement.league_concerned = league_concerned;
        }
        if let Some(location) = request.location {
            announcement.location = location;
        }
        if let Some(offer_status) = request.offer_status {
            announcement.offer_status = offer_status;
        }
        announcement.updated_at = Utc::now();

        self.repo.update(announcement).await
    }

    /// Closes a posting (position filled / withdrawn by the poster).
    pub async fn close(&self, id: Uuid) -> Result<Announcement> {
        let mut announcement = self.get_or_fail(id).await?;
        announcement.offer_status = AnnouncementStatus::Closed;
        announcement.updated_at = Utc::now();

        self.repo.update(announcement).await
    }

    /// Best-effort view counter. A storage failure here is logged and
    /// swallowed so a metrics hiccup never breaks a page view.
    pub async fn increment_view_count(&self, id: Uuid) {
        if let Err(e) = self.repo.increment_view_count(id).await {
            tracing::warn!(announcement_id = %id, error = %e, "failed to increment view count");
        }
    }

    pub fn is_expired(&self, announcement: &Announcement) -> bool {
        announcement.is_expired()
    }

    pub fn is_active(&self, announcement: &Announcement) -> bool {
        announcement.is_active()
    }

    /// True when the posting expires within the renewal window (or already
    /// has).
    pub fn needs_renewal(&self, announcement: &Announcement) -> bool {
        announcement.expires_at <= Utc::now() + Duration::days(RENEWAL_WINDOW_DAYS)
    }

    /// Extends validity by 90 days counted from the later of the current
    /// expiry and now, so renewing an expired posting does not backdate it.
    pub async fn renew(&self, id: Uuid) -> Result<Announcement> {
        let mut announcement = self.get_or_fail(id).await?;
        let now = Utc::now();

        let base = if announcement.expires_at > now {
            announcement.expires_at
        } else {
            now
        };
        announcement.expires_at = base + Duration::days(ANNOUNCEMENT_VALIDITY_DAYS);
        announcement.updated_at = now;

        self.repo.update(announcement).await
    }

    /// Guard run before any mutating interaction with a posting. The status
    /// check comes first: an expired-but-paused posting reports NotActive,
    /// an expired-but-active one reports Expired.
    pub fn validate(&self, announcement: &Announcement) -> Result<()> {
        if !announcement.is_active() {
            return Err(AppError::NotActive);
        }
        if announcement.is_expired() {
            return Err(AppError::Expired);
        }

        Ok(())
    }

    pub fn default_expiration(&self) -> DateTime<Utc> {
        Announcement::default_expiration()
    }

    /// Postings visible to a viewer profile per the access matrix, lazily
    /// excluding expired rows in the query.
    pub async fn list_visible_to(&self, viewer: ProfileType) -> Result<Vec<Announcement>> {
        let owners: Vec<ProfileType> = ProfileType::ALL
            .into_iter()
            .filter(|owner| self.matrix.can_see_announcements(viewer, *owner))
            .collect();

        self.repo.list_visible_to(&owners).await
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Announcement>> {
        self.repo.list(limit, offset).await
    }
}
