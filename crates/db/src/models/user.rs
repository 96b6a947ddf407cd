//! User entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stitchdesk_core::types::{DbId, Timestamp};

/// A row from the `users` table. The password hash never leaves the server;
/// API responses use [`PublicUser`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub organization: Option<String>,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The externally visible identity of a user.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub organization: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            organization: user.organization,
        }
    }
}

/// DTO for inserting a new user. The password is hashed before this struct
/// is built.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub role: String,
    pub organization: Option<String>,
    pub password_hash: String,
}

/// DTO for profile updates. Only the display name and organization are
/// mutable; email and role are fixed at registration. Unknown fields are
/// rejected rather than silently dropped.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub organization: Option<String>,
}
