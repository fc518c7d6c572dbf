use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::ProfileType;

/// Minimal account record. Authentication and sessions live outside this
/// service; the API is handed the acting user's id by its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    /// A profile may be unset on freshly registered accounts; an unset
    /// profile can never respond to anything.
    pub profil: Option<ProfileType>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Adresse e-mail invalide"))]
    pub email: String,
    #[validate(length(min = 2, max = 100, message = "Le nom doit contenir entre 2 et 100 caractères"))]
    pub display_name: String,
    pub profil: Option<ProfileType>,
}
