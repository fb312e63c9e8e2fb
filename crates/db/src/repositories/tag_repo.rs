//! Repository for the `tags` table.

use sqlx::PgPool;

use crate::models::tag::TagWithCount;

/// Provides read access to post tags.
pub struct TagRepo;

impl TagRepo {
    /// All tags by name, each with the number of posts carrying it.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<TagWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TagWithCount>(
            "SELECT t.id, t.name, COUNT(pt.post_id) AS post_count
             FROM tags t
             LEFT JOIN post_tags pt ON pt.tag_id = t.id
             GROUP BY t.id, t.name
             ORDER BY t.name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn exists(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tags WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
