//! Role profile attached one-to-one to each user.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    #[serde(rename = "user")]
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `PUT /admin/users/{id}/role`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRole {
    pub role: String,
}
