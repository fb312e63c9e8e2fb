//! Repository for the `authors` table.

use std::collections::HashMap;

use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::author::{Author, AuthorWithBooks, CreateAuthor, UpdateAuthor};
use crate::repositories::BookRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAuthor) -> Result<Author, sqlx::Error> {
        let query = format!("INSERT INTO authors (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an author by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List all authors ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors ORDER BY name, id");
        sqlx::query_as::<_, Author>(&query).fetch_all(pool).await
    }

    /// List all authors with their books nested, using one query per table.
    pub async fn list_with_books(pool: &PgPool) -> Result<Vec<AuthorWithBooks>, sqlx::Error> {
        let authors = Self::list(pool).await?;
        let ids: Vec<DbId> = authors.iter().map(|a| a.id).collect();

        let mut by_author: HashMap<DbId, Vec<_>> = HashMap::new();
        for book in BookRepo::list_by_authors(pool, &ids).await? {
            by_author.entry(book.author_id).or_default().push(book);
        }

        Ok(authors
            .into_iter()
            .map(|author| {
                let books = by_author.remove(&author.id).unwrap_or_default();
                AuthorWithBooks::new(author, books)
            })
            .collect())
    }

    /// Find an author by ID with its books nested.
    pub async fn find_with_books(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AuthorWithBooks>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(author) => {
                let books = BookRepo::list_by_authors(pool, &[author.id]).await?;
                Ok(Some(AuthorWithBooks::new(author, books)))
            }
            None => Ok(None),
        }
    }

    /// Update an author. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAuthor,
    ) -> Result<Option<Author>, sqlx::Error> {
        let query = format!(
            "UPDATE authors SET
                name = COALESCE($2, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete an author and, by cascade, all of its books.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
