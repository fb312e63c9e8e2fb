//! Repository for the `users` table.

use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateProfile, User, UserProfileView};
use crate::repositories::{ProfileRepo, TokenRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, email, password_hash, bio, profile_picture, date_joined, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user and its default profile in one transaction.
    ///
    /// Every account gets exactly one `Member` profile at creation time.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let user = Self::insert_inner(&mut tx, input).await?;
        ProfileRepo::create_default_inner(&mut tx, user.id).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Register an account: user, default profile and first token, all or
    /// nothing.
    pub async fn register(
        pool: &PgPool,
        input: &CreateUser,
        token_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let user = Self::insert_inner(&mut tx, input).await?;
        ProfileRepo::create_default_inner(&mut tx, user.id).await?;
        TokenRepo::issue_inner(&mut tx, user.id, token_hash).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Profile view: account fields, role and follow counts.
    pub async fn find_profile_view(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserProfileView>, sqlx::Error> {
        sqlx::query_as::<_, UserProfileView>(
            "SELECT u.id, u.username, u.email, u.bio, u.profile_picture,
                    COALESCE(p.role, 'Member') AS role,
                    (SELECT COUNT(*) FROM follows f WHERE f.followed_id = u.id) AS followers_count,
                    (SELECT COUNT(*) FROM follows f WHERE f.follower_id = u.id) AS following_count,
                    u.date_joined
             FROM users u
             LEFT JOIN user_profiles p ON p.user_id = u.id
             WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                bio = COALESCE($3, bio),
                profile_picture = COALESCE($4, profile_picture),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.bio)
            .bind(&input.profile_picture)
            .fetch_optional(pool)
            .await
    }

    async fn insert_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, bio, profile_picture)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.bio)
            .bind(&input.profile_picture)
            .fetch_one(&mut **tx)
            .await
    }
}
