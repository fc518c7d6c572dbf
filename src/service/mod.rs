pub mod announcement_service;
pub mod favorite_service;
pub mod notification_service;
pub mod response_service;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::access::AccessMatrix;
use crate::repository::*;

pub use announcement_service::AnnouncementService;
pub use favorite_service::FavoriteService;
pub use notification_service::NotificationService;
pub use response_service::ResponseService;

/// Wires repositories, the access matrix and the workflow services
/// together. Everything here is shared read-only across requests; the
/// matrix is immutable and the services are stateless between calls.
pub struct ServiceContext {
    pub user_repo: Arc<dyn UserRepository>,
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub response_repo: Arc<dyn ResponseRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub access_matrix: Arc<AccessMatrix>,
    pub announcement_service: Arc<AnnouncementService>,
    pub response_service: Arc<ResponseService>,
    pub favorite_service: Arc<FavoriteService>,
    pub notification_service: Arc<NotificationService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool) -> Self {
        let user_repo: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(db_pool.clone()));
        let announcement_repo: Arc<dyn AnnouncementRepository> =
            Arc::new(SqliteAnnouncementRepository::new(db_pool.clone()));
        let response_repo: Arc<dyn ResponseRepository> =
            Arc::new(SqliteResponseRepository::new(db_pool.clone()));
        let favorite_repo: Arc<dyn FavoriteRepository> =
            Arc::new(SqliteFavoriteRepository::new(db_pool.clone()));
        let notification_repo: Arc<dyn NotificationRepository> =
            Arc::new(SqliteNotificationRepository::new(db_pool.clone()));

        let access_matrix = Arc::new(AccessMatrix::new());

        let notification_service = Arc::new(NotificationService::new(notification_repo.clone()));
        let announcement_service = Arc::new(AnnouncementService::new(
            announcement_repo.clone(),
            access_matrix.clone(),
        ));
        let response_service = Arc::new(ResponseService::new(
            response_repo.clone(),
            announcement_service.clone(),
            access_matrix.clone(),
            notification_service.clone(),
        ));
        let favorite_service = Arc::new(FavoriteService::new(favorite_repo.clone()));

        Self {
            user_repo,
            announcement_repo,
            response_repo,
            favorite_repo,
            notification_repo,
            access_matrix,
            announcement_service,
            response_service,
            favorite_service,
            notification_service,
            db_pool,
        }
    }
}
