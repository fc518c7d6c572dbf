use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{AnnouncementResponse, ResponseStatus},
    error::{is_unique_violation, AppError, Result},
    repository::ResponseRepository,
};

#[derive(FromRow)]
struct ResponseRow {
    id: String,
    announcement_id: String,
    user_id: String,
    message: String,
    status: String,
    is_read: i32,
    attachment_path: Option<String>,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
}

pub struct SqliteResponseRepository {
    pool: SqlitePool,
}

impl SqliteResponseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_response(row: ResponseRow) -> Result<AnnouncementResponse> {
        Ok(AnnouncementResponse {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            announcement_id: Uuid::parse_str(&row.announcement_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            message: row.message,
            status: ResponseStatus::parse(&row.status).ok_or_else(|| {
                AppError::Database(format!("Invalid response status: {}", row.status))
            })?,
            is_read: row.is_read != 0,
            attachment_path: row.attachment_path,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: row
                .updated_at
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, announcement_id, user_id, message, status, is_read,
           attachment_path, created_at, updated_at
    FROM announcement_responses
"#;

#[async_trait]
impl ResponseRepository for SqliteResponseRepository {
    async fn create(&self, response: AnnouncementResponse) -> Result<AnnouncementResponse> {
        sqlx::query(
            r#"
            INSERT INTO announcement_responses (
                id, announcement_id, user_id, message, status, is_read,
                attachment_path, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(response.id.to_string())
        .bind(response.announcement_id.to_string())
        .bind(response.user_id.to_string())
        .bind(&response.message)
        .bind(response.status.as_str())
        .bind(if response.is_read { 1i32 } else { 0i32 })
        .bind(&response.attachment_path)
        .bind(response.created_at.naive_utc())
        .bind(response.updated_at.map(|dt| dt.naive_utc()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique index on (announcement_id, user_id) closes the
            // check-then-insert window under concurrent responds.
            if is_unique_violation(&e) {
                AppError::AlreadyResponded
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        self.find_by_id(response.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created response".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AnnouncementResponse>> {
        let row = sqlx::query_as::<_, ResponseRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_response(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_announcement_and_user(
        &self,
        announcement_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AnnouncementResponse>> {
        let row = sqlx::query_as::<_, ResponseRow>(&format!(
            "{SELECT_COLUMNS} WHERE announcement_id = ? AND user_id = ?"
        ))
        .bind(announcement_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_response(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnnouncementResponse>> {
        let rows = sqlx::query_as::<_, ResponseRow>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? ORDER BY created_at DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_response).collect()
    }

    async fn list_by_announcement(
        &self,
        announcement_id: Uuid,
    ) -> Result<Vec<AnnouncementResponse>> {
        let rows = sqlx::query_as::<_, ResponseRow>(&format!(
            "{SELECT_COLUMNS} WHERE announcement_id = ? ORDER BY created_at DESC"
        ))
        .bind(announcement_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_response).collect()
    }

    async fn list_by_status(&self, status: ResponseStatus) -> Result<Vec<AnnouncementResponse>> {
        let rows = sqlx::query_as::<_, ResponseRow>(&format!(
            "{SELECT_COLUMNS} WHERE status = ? ORDER BY created_at DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_response).collect()
    }

    async fn update(&self, response: AnnouncementResponse) -> Result<AnnouncementResponse> {
        sqlx::query(
            r#"
            UPDATE announcement_responses
            SET message = ?, status = ?, is_read = ?, attachment_path = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&response.message)
        .bind(response.status.as_str())
        .bind(if response.is_read { 1i32 } else { 0i32 })
        .bind(&response.attachment_path)
        .bind(response.updated_at.map(|dt| dt.naive_utc()))
        .bind(response.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(response.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated response".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM announcement_responses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn count_by_announcement(&self, announcement_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM announcement_responses WHERE announcement_id = ?",
        )
        .bind(announcement_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count.0)
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM announcement_responses WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count.0)
    }
}
