//! Repository for the `user_profiles` table.

use shelfmark_core::roles::ROLE_MEMBER;
use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::UserProfile;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, role, created_at, updated_at";

/// Provides read and role-change operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Set a user's role. Returns `None` if the user has no profile.
    pub async fn set_role(
        pool: &PgPool,
        user_id: DbId,
        role: &str,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET role = $2, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Post-create hook: give a new user its `Member` profile.
    pub(crate) async fn create_default_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id, role) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(ROLE_MEMBER)
            .fetch_one(&mut **tx)
            .await
    }
}
