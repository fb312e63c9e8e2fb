//! User account model and DTOs.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserSummary`] or [`UserProfileView`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: String,
    pub profile_picture: Option<String>,
    pub date_joined: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal public identity embedded in auth responses and follower lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Profile representation with role and follow counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfileView {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub profile_picture: Option<String>,
    pub role: String,
    pub followers_count: i64,
    pub following_count: i64,
    pub date_joined: Timestamp,
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: String,
    pub profile_picture: Option<String>,
}

/// Writable profile fields for a partial (`PATCH`) update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(max = 500, message = "Ensure this field has no more than 500 characters."))]
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

/// Body of a full profile `PUT`: email and bio are required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceProfile {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(max = 500, message = "Ensure this field has no more than 500 characters."))]
    pub bio: String,
    pub profile_picture: Option<String>,
}

impl From<ReplaceProfile> for UpdateProfile {
    fn from(input: ReplaceProfile) -> Self {
        Self {
            email: Some(input.email),
            bio: Some(input.bio),
            profile_picture: input.profile_picture,
        }
    }
}
