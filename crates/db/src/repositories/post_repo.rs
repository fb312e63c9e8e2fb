//! Repository for the `posts` table and its tag links.

use shelfmark_core::listing::{contains_pattern, Page};
use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, UpdatePost};
use crate::repositories::page_sql;

/// Post columns joined with the author's username and the sorted tag names.
const SELECT_POST: &str = "SELECT p.id, p.author_id, u.username AS author_username, \
        p.title, p.content, \
        COALESCE( \
            (SELECT ARRAY_AGG(t.name::TEXT ORDER BY t.name) \
             FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = p.id), \
            ARRAY[]::TEXT[] \
        ) AS tags, \
        p.created_at, p.updated_at \
    FROM posts p \
    JOIN users u ON u.id = p.author_id";

/// Newest first; `id` breaks ties between posts created in the same instant.
const ORDER_NEWEST: &str = "ORDER BY p.created_at DESC, p.id DESC";

/// Provides CRUD, search and feed queries for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a post and its tag links in one transaction.
    ///
    /// `input.tags` must already be normalized.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO posts (author_id, title, content) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(author_id)
        .bind(&input.title)
        .bind(&input.content)
        .fetch_one(&mut *tx)
        .await?;

        Self::set_tags_inner(&mut tx, id, &input.tags).await?;

        let query = format!("{SELECT_POST} WHERE p.id = $1");
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(post)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("{SELECT_POST} WHERE p.id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List posts, newest first. Every search term must match the title or
    /// the content.
    pub async fn list(
        pool: &PgPool,
        search_terms: &[String],
        page: &Page,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        for _ in search_terms {
            conditions.push(format!(
                "(p.title ILIKE ${bind_idx} OR p.content ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "{SELECT_POST} {where_clause} {ORDER_NEWEST} {page}",
            page = page_sql(bind_idx),
        );

        let mut q = sqlx::query_as::<_, Post>(&query);
        for term in search_terms {
            q = q.bind(contains_pattern(term));
        }
        q.bind(page.limit).bind(page.offset).fetch_all(pool).await
    }

    /// Posts written by users that `user_id` follows, newest first.
    pub async fn feed(pool: &PgPool, user_id: DbId, page: &Page) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "{SELECT_POST} \
             WHERE p.author_id IN (SELECT followed_id FROM follows WHERE follower_id = $1) \
             {ORDER_NEWEST} {page}",
            page = page_sql(2),
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Posts carrying the (normalized) tag `name`, newest first.
    pub async fn list_by_tag(pool: &PgPool, name: &str) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "{SELECT_POST} \
             WHERE EXISTS ( \
                 SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
                 WHERE pt.post_id = p.id AND t.name = $1 \
             ) \
             {ORDER_NEWEST}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only non-`None` fields are applied; `Some(tags)`
    /// replaces the whole tag set. Runs in one transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        if let Some(ref tags) = input.tags {
            Self::set_tags_inner(&mut tx, id, tags).await?;
        }

        let query = format!("{SELECT_POST} WHERE p.id = $1");
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(post))
    }

    /// Delete a post; its comments and tag links cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Replace the tag links of `post_id`, creating missing tags.
    async fn set_tags_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        post_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut **tx)
            .await?;

        if names.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO tags (name) SELECT UNNEST($1::TEXT[])
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(names)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            "INSERT INTO post_tags (post_id, tag_id)
             SELECT $1, id FROM tags WHERE name = ANY($2)",
        )
        .bind(post_id)
        .bind(names)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
