//! User account model and DTOs.

use sqlx::FromRow;
use playlife_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash; never serialize it. API responses are built
/// from the profile and the resolved role instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}
