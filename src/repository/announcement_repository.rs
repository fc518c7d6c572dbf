use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{
        Announcement, AnnouncementStatus, LeagueDivision, OfferType, ProfileType, Region,
    },
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

#[derive(FromRow)]
struct AnnouncementRow {
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

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
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
            location: Region::parse(&row.location).ok_or_else(|| {
                AppError::Database(format!("Invalid region: {}", row.location))
            })?,
            offer_status: AnnouncementStatus::parse(&row.offer_status).ok_or_else(|| {
                AppError::Database(format!("Invalid status: {}", row.offer_status))
            })?,
            view_count: row.view_count,
            profil: ProfileType::parse(&row.profil).ok_or_else(|| {
                AppError::Database(format!("Invalid profile: {}", row.profil))
            })?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
            expires_at: DateTime::from_naive_utc_and_offset(row.expires_at, Utc),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, offer_type, title, description, offer_user_profil,
           position_sought, league_concerned, location, offer_status,
           view_count, profil, created_at, updated_at, expires_at
    FROM announcements
"#;

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: Announcement) -> Result<Announcement> {
        sqlx::query(
            r#"
            INSERT INTO announcements (
                id, offer_type, title, description, offer_user_profil,
                position_sought, league_concerned, location, offer_status,
                view_count, profil, created_at, updated_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(announcement.id.to_string())
        .bind(announcement.offer_type.as_str())
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(announcement.offer_user_profil.as_str())
        .bind(&announcement.position_sought)
        .bind(announcement.league_concerned.as_str())
        .bind(announcement.location.as_str())
        .bind(announcement.offer_status.as_str())
        .bind(announcement.view_count)
        .bind(announcement.profil.as_str())
        .bind(announcement.created_at.naive_utc())
        .bind(announcement.updated_at.naive_utc())
        .bind(announcement.expires_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(announcement.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_announcement(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn list_visible_to(&self, owners: &[ProfileType]) -> Result<Vec<Announcement>> {
        if owners.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; owners.len()].join(", ");
        let sql = format!(
            "{SELECT_COLUMNS} \
             WHERE profil IN ({placeholders}) \
               AND offer_status = 'active' \
               AND expires_at > ? \
             ORDER BY created_at DESC"
        );

        let mut query = sqlx::query_as::<_, AnnouncementRow>(&sql);
        for owner in owners {
            query = query.bind(owner.as_str());
        }
        query = query.bind(Utc::now().naive_utc());

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn update(&self, announcement: Announcement) -> Result<Announcement> {
        sqlx::query(
            r#"
            UPDATE announcements
            SET offer_type = ?, title = ?, description = ?, offer_user_profil = ?,
                position_sought = ?, league_concerned = ?, location = ?,
                offer_status = ?, profil = ?, updated_at = ?, expires_at = ?
            WHERE id = ?
            "#,
        )
        .bind(announcement.offer_type.as_str())
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(announcement.offer_user_profil.as_str())
        .bind(&announcement.position_sought)
        .bind(announcement.league_concerned.as_str())
        .bind(announcement.location.as_str())
        .bind(announcement.offer_status.as_str())
        .bind(announcement.profil.as_str())
        .bind(announcement.updated_at.naive_utc())
        .bind(announcement.expires_at.naive_utc())
        .bind(announcement.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(announcement.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated announcement".to_string())
        })
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE announcements SET view_count = view_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
