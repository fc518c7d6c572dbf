use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod favorite_repository;
pub mod notification_repository;
pub mod response_repository;
pub mod user_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use favorite_repository::SqliteFavoriteRepository;
pub use notification_repository::SqliteNotificationRepository;
pub use response_repository::SqliteResponseRepository;
pub use user_repository::SqliteUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: CreateUserRequest) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>>;
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: Announcement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Announcement>>;
    /// Active, unexpired announcements whose owner profile is in `owners`,
    /// newest first. Expiration is filtered here, on read, never by a sweep.
    async fn list_visible_to(&self, owners: &[ProfileType]) -> Result<Vec<Announcement>>;
    async fn update(&self, announcement: Announcement) -> Result<Announcement>;
    /// Single-statement counter bump so concurrent views never lose updates.
    async fn increment_view_count(&self, id: Uuid) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Inserts a response. A storage unique violation on
    /// (announcement, user) surfaces as `AppError::AlreadyResponded`.
    async fn create(&self, response: AnnouncementResponse) -> Result<AnnouncementResponse>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AnnouncementResponse>>;
    async fn find_by_announcement_and_user(
        &self,
        announcement_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AnnouncementResponse>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnnouncementResponse>>;
    async fn list_by_announcement(&self, announcement_id: Uuid)
        -> Result<Vec<AnnouncementResponse>>;
    async fn list_by_status(&self, status: ResponseStatus) -> Result<Vec<AnnouncementResponse>>;
    async fn update(&self, response: AnnouncementResponse) -> Result<AnnouncementResponse>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn count_by_announcement(&self, announcement_id: Uuid) -> Result<i64>;
    async fn count_by_user(&self, user_id: Uuid) -> Result<i64>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Inserts a favorite link. A storage unique violation on
    /// (announcement, user) surfaces as `AppError::AlreadyFavorited`.
    async fn create(&self, favorite: SavedAnnouncement) -> Result<SavedAnnouncement>;
    async fn find_by_announcement_and_user(
        &self,
        announcement_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SavedAnnouncement>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SavedAnnouncement>>;
    /// The favorited announcements themselves, newest favorite first.
    async fn list_announcements_by_user(&self, user_id: Uuid) -> Result<Vec<Announcement>>;
    async fn update(&self, favorite: SavedAnnouncement) -> Result<SavedAnnouncement>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn delete_all_by_user(&self, user_id: Uuid) -> Result<u64>;
    async fn count_by_user(&self, user_id: Uuid) -> Result<i64>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: NewNotification) -> Result<Notification>;
    async fn list_unread_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>>;
    async fn list_recent_by_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Notification>>;
    async fn count_unread_by_user(&self, user_id: Uuid) -> Result<i64>;
    async fn mark_read(&self, id: Uuid) -> Result<()>;
    async fn mark_all_read_by_user(&self, user_id: Uuid) -> Result<u64>;
    async fn delete_older_than_days(&self, days: i64) -> Result<u64>;
}
