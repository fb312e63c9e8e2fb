//! Repository for the `auth_tokens` table.

use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::token::{AuthToken, TokenIdentity};

/// Provides issue, lookup and revoke operations for authentication tokens.
pub struct TokenRepo;

impl TokenRepo {
    /// Store `key_hash` as the user's token, replacing any previous one.
    pub async fn issue(
        pool: &PgPool,
        user_id: DbId,
        key_hash: &str,
    ) -> Result<AuthToken, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let token = Self::issue_inner(&mut tx, user_id, key_hash).await?;
        tx.commit().await?;
        Ok(token)
    }

    /// Resolve a token hash to the owning user and role.
    pub async fn find_identity(
        pool: &PgPool,
        key_hash: &str,
    ) -> Result<Option<TokenIdentity>, sqlx::Error> {
        sqlx::query_as::<_, TokenIdentity>(
            "SELECT t.user_id, u.username, p.role
             FROM auth_tokens t
             JOIN users u ON u.id = t.user_id
             LEFT JOIN user_profiles p ON p.user_id = t.user_id
             WHERE t.key_hash = $1",
        )
        .bind(key_hash)
        .fetch_optional(pool)
        .await
    }

    /// Delete the user's token. Returns `true` if one existed.
    pub async fn revoke(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub(crate) async fn issue_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        key_hash: &str,
    ) -> Result<AuthToken, sqlx::Error> {
        sqlx::query_as::<_, AuthToken>(
            "INSERT INTO auth_tokens (user_id, key_hash) VALUES ($1, $2)
             ON CONFLICT (user_id)
             DO UPDATE SET key_hash = EXCLUDED.key_hash, created_at = NOW()
             RETURNING user_id, key_hash, created_at",
        )
        .bind(user_id)
        .bind(key_hash)
        .fetch_one(&mut **tx)
        .await
    }
}
