//! Repository for the `follows` table (asymmetric follower graph).

use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::UserSummary;

/// Provides follow/unfollow and follower listing.
pub struct FollowRepo;

impl FollowRepo {
    /// Record that `follower_id` follows `followed_id`.
    ///
    /// Returns `false` if the edge already existed. Self-follows violate
    /// `ck_follows_not_self`; callers reject them earlier.
    pub async fn follow(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO follows (follower_id, followed_id) VALUES ($1, $2)
             ON CONFLICT (follower_id, followed_id) DO NOTHING",
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a follow edge. Returns `true` if it existed.
    pub async fn unfollow(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
                .bind(follower_id)
                .bind(followed_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_following(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(pool)
        .await
    }

    /// Users following `user_id`, by username.
    pub async fn followers(pool: &PgPool, user_id: DbId) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.username, u.email
             FROM follows f JOIN users u ON u.id = f.follower_id
             WHERE f.followed_id = $1
             ORDER BY u.username",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Users that `user_id` follows, by username.
    pub async fn following(pool: &PgPool, user_id: DbId) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.username, u.email
             FROM follows f JOIN users u ON u.id = f.followed_id
             WHERE f.follower_id = $1
             ORDER BY u.username",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
