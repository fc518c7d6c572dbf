use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{
        Announcement, AnnouncementStatus, LeagueDivision, OfferType, ProfileType, Region,
        SavedAnnouncement,
    },
    error::{is_unique_violation, AppError, Result},
    repository::FavoriteRepository,
};

#[derive(FromRow)]
struct FavoriteRow {
    id: String,
    announcement_id: String,
    user_id: String,
    notes: Option<String>,
    created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct FavoriteAnnouncementRow {
    id: String,
    offer_type: String,
    title: String,
    description: String,
    offer_user_profil: String,
    position_sought: String,
    league_concerned: String,
    location: String,
    offer_status: String,
    view_count: i64,
    profil: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    expires_at: NaiveDateTime,
}

pub struct SqliteFavoriteRepository {
    pool: SqlitePool,
}

impl SqliteFavoriteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_favorite(row: FavoriteRow) -> Result<SavedAnnouncement> {
        Ok(SavedAnnouncement {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            announcement_id: Uuid::parse_str(&row.announcement_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            notes: row.notes,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn row_to_announcement(row: FavoriteAnnouncementRow) -> Result<Announcement> {
        Ok(Announcement {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            offer_type: OfferType::parse(&row.offer_type).ok_or_else(|| {
                AppError::Database(format!("Invalid offer type: {}", row.offer_type))
            })?,
            title: row.title,
            description: row.description,
            offer_user_profil: ProfileType::parse(&row.offer_user_profil).ok_or_else(|| {
                AppError::Database(format!("Invalid profile: {}", row.offer_user_profil))
            })?,
            position_sought: row.position_sought,
            league_concerned: LeagueDivision::parse(&row.league_concerned).ok_or_else(|| {
                AppError::Database(format!("Invalid division: {}", row.league_concerned))
            })?,
            location: Region::parse(&row.location)
                .ok_or_else(|| AppError::Database(format!("Invalid region: {}", row.location)))?,
            offer_status: AnnouncementStatus::parse(&row.offer_status).ok_or_else(|| {
                AppError::Database(format!("Invalid status: {}", row.offer_status))
            })?,
            view_count: row.view_count,
            profil: ProfileType::parse(&row.profil)
                .ok_or_else(|| AppError::Database(format!("Invalid profile: {}", row.profil)))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
            expires_at: DateTime::from_naive_utc_and_offset(row.expires_at, Utc),
        })
    }
}

#[async_trait]
impl FavoriteRepository for SqliteFavoriteRepository {
    async fn create(&self, favorite: SavedAnnouncement) -> Result<SavedAnnouncement> {
        sqlx::query(
            r#"
            INSERT INTO saved_announcements (id, announcement_id, user_id, notes, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(favorite.id.to_string())
        .bind(favorite.announcement_id.to_string())
        .bind(favorite.user_id.to_string())
        .bind(&favorite.notes)
        .bind(favorite.created_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyFavorited
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(favorite)
    }

    async fn find_by_announcement_and_user(
        &self,
        announcement_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SavedAnnouncement>> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, announcement_id, user_id, notes, created_at
            FROM saved_announcements
            WHERE announcement_id = ? AND user_id = ?
            "#,
        )
        .bind(announcement_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_favorite(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SavedAnnouncement>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, announcement_id, user_id, notes, created_at
            FROM saved_announcements
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_favorite).collect()
    }

    async fn list_announcements_by_user(&self, user_id: Uuid) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, FavoriteAnnouncementRow>(
            r#"
            SELECT a.id, a.offer_type, a.title, a.description, a.offer_user_profil,
                   a.position_sought, a.league_concerned, a.location, a.offer_status,
                   a.view_count, a.profil, a.created_at, a.updated_at, a.expires_at
            FROM saved_announcements sa
            JOIN announcements a ON a.id = sa.announcement_id
            WHERE sa.user_id = ?
            ORDER BY sa.created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn update(&self, favorite: SavedAnnouncement) -> Result<SavedAnnouncement> {
        sqlx::query("UPDATE saved_announcements SET notes = ? WHERE id = ?")
            .bind(&favorite.notes)
            .bind(favorite.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(favorite)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM saved_announcements WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_all_by_user(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM saved_announcements WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM saved_announcements WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count.0)
    }
}
