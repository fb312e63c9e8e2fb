//! Repository for the `books` table.

use shelfmark_core::listing::{contains_pattern, order_by_sql, BookQuery};
use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::repositories::page_sql;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, publication_year, author_id, created_at, updated_at";

/// [`COLUMNS`] qualified with the `b` alias for joined queries.
const QUALIFIED_COLUMNS: &str =
    "b.id, b.title, b.publication_year, b.author_id, b.created_at, b.updated_at";

/// Provides CRUD and listing operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, publication_year, author_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(input.publication_year)
            .bind(input.author)
            .fetch_one(pool)
            .await
    }

    /// Find a book by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List books with exact filters, term search and ordering applied.
    ///
    /// - `title`, `author_id`, `publication_year` are equality filters.
    /// - Each search term must match the title or the author name
    ///   (case-insensitive substring).
    /// - Ordering comes from the whitelisted fields in [`BookQuery`], with
    ///   `b.id` as the final tie-breaker.
    pub async fn list(pool: &PgPool, params: &BookQuery) -> Result<Vec<Book>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.title.is_some() {
            conditions.push(format!("b.title = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.author_id.is_some() {
            conditions.push(format!("b.author_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.publication_year.is_some() {
            conditions.push(format!("b.publication_year = ${bind_idx}"));
            bind_idx += 1;
        }
        for _ in &params.search_terms {
            conditions.push(format!(
                "(b.title ILIKE ${bind_idx} OR a.name ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} \
             FROM books b \
             JOIN authors a ON a.id = b.author_id \
             {where_clause} \
             ORDER BY {order_by} \
             {page}",
            order_by = order_by_sql(&params.ordering, "b.id"),
            page = page_sql(bind_idx),
        );

        let mut q = sqlx::query_as::<_, Book>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref title) = params.title {
            q = q.bind(title);
        }
        if let Some(author_id) = params.author_id {
            q = q.bind(author_id);
        }
        if let Some(year) = params.publication_year {
            q = q.bind(year);
        }
        for term in &params.search_terms {
            q = q.bind(contains_pattern(term));
        }

        q = q.bind(params.page.limit).bind(params.page.offset);
        q.fetch_all(pool).await
    }

    /// All books by any of the given authors, ordered by title.
    pub async fn list_by_authors(
        pool: &PgPool,
        author_ids: &[DbId],
    ) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books WHERE author_id = ANY($1) ORDER BY title, id"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(author_ids)
            .fetch_all(pool)
            .await
    }

    /// Books held by a library, ordered by title.
    pub async fn list_by_library(
        pool: &PgPool,
        library_id: DbId,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM books b \
             JOIN library_books lb ON lb.book_id = b.id \
             WHERE lb.library_id = $1 \
             ORDER BY b.title, b.id"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(library_id)
            .fetch_all(pool)
            .await
    }

    /// Update a book. Only non-`None` fields in `input` are applied, so a
    /// fully populated DTO acts as a replacement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                title = COALESCE($2, title),
                publication_year = COALESCE($3, publication_year),
                author_id = COALESCE($4, author_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.publication_year)
            .bind(input.author)
            .fetch_optional(pool)
            .await
    }

    /// Delete a book by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await
    }
}
