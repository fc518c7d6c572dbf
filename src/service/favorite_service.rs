use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{Announcement, SavedAnnouncement},
    error::{AppError, Result},
    repository::FavoriteRepository,
};

/// A user's favorites list, with the at-most-one-favorite-per-posting rule
/// enforced by a pre-check and, against races, by the schema's unique index.
pub struct FavoriteService {
    repo: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(repo: Arc<dyn FavoriteRepository>) -> Self {
        Self { repo }
    }

    pub async fn save(
        &self,
        announcement_id: Uuid,
        user_id: Uuid,
        notes: Option<String>,
    ) -> Result<SavedAnnouncement> {
        if self.has(announcement_id, user_id).await? {
            return Err(AppError::AlreadyFavorited);
        }

        let favorite = SavedAnnouncement {
            id: Uuid::new_v4(),
            announcement_id,
            user_id,
            notes,
            created_at: Utc::now(),
        };

        self.repo.create(favorite).await
    }

    pub async fn remove(&self, announcement_id: Uuid, user_id: Uuid) -> Result<()> {
        let favorite = self
            .repo
            .find_by_announcement_and_user(announcement_id, user_id)
            .await?
            .ok_or(AppError::NotFavorited)?;

        self.repo.delete(favorite.id).await
    }

    /// The favorited announcements, newest favorite first.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Announcement>> {
        self.repo.list_announcements_by_user(user_id).await
    }

    /// The favorite link records themselves, notes included.
    pub async fn list_entries(&self, user_id: Uuid) -> Result<Vec<SavedAnnouncement>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn entry(
        &self,
        announcement_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SavedAnnouncement>> {
        self.repo
            .find_by_announcement_and_user(announcement_id, user_id)
            .await
    }

    pub async fn get_notes(&self, announcement_id: Uuid, user_id: Uuid) -> Result<Option<String>> {
        Ok(self
            .entry(announcement_id, user_id)
            .await?
            .and_then(|f| f.notes))
    }

    pub async fn update_notes(
        &self,
        announcement_id: Uuid,
        user_id: Uuid,
        notes: String,
    ) -> Result<SavedAnnouncement> {
        let mut favorite = self
            .repo
            .find_by_announcement_and_user(announcement_id, user_id)
            .await?
            .ok_or(AppError::NotFavorited)?;

        favorite.notes = Some(notes);
        self.repo.update(favorite).await
    }

    pub async fn has(&self, announcement_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self
            .repo
            .find_by_announcement_and_user(announcement_id, user_id)
            .await?
            .is_some())
    }

    pub async fn count(&self, user_id: Uuid) -> Result<i64> {
        self.repo.count_by_user(user_id).await
    }

    pub async fn has_favorites(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.count(user_id).await? > 0)
    }

    /// Empties the list, returning how many links were removed.
    pub async fn clear_all(&self, user_id: Uuid) -> Result<u64> {
        self.repo.delete_all_by_user(user_id).await
    }
}
