use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A user's private bookmark of an announcement. At most one per
/// (announcement, user) pair, backed by a unique index in the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAnnouncement {
    pub id: Uuid,
    pub announcement_id: Uuid,
    pub user_id: Uuid,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveToFavoritesRequest {
    pub announcement_id: Uuid,
    #[validate(length(max = 255, message = "Les notes ne peuvent pas dépasser 255 caractères"))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFavoriteNotesRequest {
    #[validate(length(max = 255, message = "Les notes ne peuvent pas dépasser 255 caractères"))]
    pub notes: String,
}
