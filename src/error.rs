use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Domain and infrastructure errors. Every variant is recoverable and
/// caller-visible; the displayed copy is what the UI shows to users.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cette annonce n'est plus active.")]
    NotActive,

    #[error("Cette annonce est expirée.")]
    Expired,

    #[error("Vous ne pouvez pas répondre à cette annonce.")]
    CannotRespond,

    #[error("Vous avez déjà répondu à cette annonce.")]
    AlreadyResponded,

    #[error("Cette annonce est déjà dans vos favoris.")]
    AlreadyFavorited,

    #[error("Cette annonce n'est pas dans vos favoris.")]
    NotFavorited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotActive => (StatusCode::CONFLICT, self.to_string()),
            AppError::Expired => (StatusCode::GONE, self.to_string()),
            AppError::CannotRespond => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::AlreadyResponded => (StatusCode::CONFLICT, self.to_string()),
            AppError::AlreadyFavorited => (StatusCode::CONFLICT, self.to_string()),
            AppError::NotFavorited => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// True when a storage error is a unique-constraint violation. Repositories
/// use this to re-report the race-losing insert as the same domain error the
/// pre-insert check would have produced.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
