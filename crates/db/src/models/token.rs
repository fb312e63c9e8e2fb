//! Authentication token rows.

use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `auth_tokens` table. Only the key's hash is stored.
#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub user_id: DbId,
    pub key_hash: String,
    pub created_at: Timestamp,
}

/// The identity a valid token resolves to.
#[derive(Debug, Clone, FromRow)]
pub struct TokenIdentity {
    pub user_id: DbId,
    pub username: String,
    /// `None` only if the profile row is missing.
    pub role: Option<String>,
}
