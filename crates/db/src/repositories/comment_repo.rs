//! Repository for the `comments` table.

use shelfmark_core::listing::Page;
use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CreateComment, UpdateComment};
use crate::repositories::page_sql;

/// Comment columns joined with the author's username.
const SELECT_COMMENT: &str = "SELECT c.id, c.post_id, c.author_id, \
        u.username AS author_username, c.content, c.created_at, c.updated_at \
    FROM comments c \
    JOIN users u ON u.id = c.author_id";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment by `author_id`, returning it with the username.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "WITH inserted AS (
                 INSERT INTO comments (post_id, author_id, content)
                 VALUES ($1, $2, $3)
                 RETURNING id, post_id, author_id, content, created_at, updated_at
             )
             SELECT c.id, c.post_id, c.author_id, u.username AS author_username,
                    c.content, c.created_at, c.updated_at
             FROM inserted c
             JOIN users u ON u.id = c.author_id",
        )
        .bind(input.post)
        .bind(author_id)
        .bind(&input.content)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("{SELECT_COMMENT} WHERE c.id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List comments oldest first, optionally restricted to one post.
    pub async fn list(
        pool: &PgPool,
        post_id: Option<DbId>,
        page: &Page,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "{SELECT_COMMENT} \
             WHERE ($1::BIGINT IS NULL OR c.post_id = $1) \
             ORDER BY c.created_at, c.id \
             {page}",
            page = page_sql(2),
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a comment's content. Returns `None` if the comment is gone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "WITH updated AS (
                 UPDATE comments SET
                     content = COALESCE($2, content),
                     updated_at = NOW()
                 WHERE id = $1
                 RETURNING id, post_id, author_id, content, created_at, updated_at
             )
             SELECT c.id, c.post_id, c.author_id, u.username AS author_username,
                    c.content, c.created_at, c.updated_at
             FROM updated c
             JOIN users u ON u.id = c.author_id",
        )
        .bind(id)
        .bind(&input.content)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_for_post(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await
    }
}
