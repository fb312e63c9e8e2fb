//! Repository for the `libraries` and `library_books` tables.

use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::library::{CreateLibrary, Library, LibraryDetail};
use crate::repositories::{BookRepo, LibrarianRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for libraries and their holdings.
pub struct LibraryRepo;

impl LibraryRepo {
    /// Insert a new library, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLibrary) -> Result<Library, sqlx::Error> {
        let query = format!("INSERT INTO libraries (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Library>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a library by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Library>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM libraries WHERE id = $1");
        sqlx::query_as::<_, Library>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a library with its books and librarian.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LibraryDetail>, sqlx::Error> {
        let Some(library) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let books = BookRepo::list_by_library(pool, id).await?;
        let librarian = LibrarianRepo::find_by_library(pool, id).await?;
        Ok(Some(LibraryDetail {
            library,
            books,
            librarian,
        }))
    }

    /// List all libraries ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Library>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM libraries ORDER BY name, id");
        sqlx::query_as::<_, Library>(&query).fetch_all(pool).await
    }

    /// Rename a library. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateLibrary,
    ) -> Result<Option<Library>, sqlx::Error> {
        let query = format!(
            "UPDATE libraries SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Library>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a library; its holdings and librarian go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM libraries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a book to a library's holdings. Adding it twice is a no-op.
    pub async fn add_book(pool: &PgPool, library_id: DbId, book_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO library_books (library_id, book_id) VALUES ($1, $2)
             ON CONFLICT (library_id, book_id) DO NOTHING",
        )
        .bind(library_id)
        .bind(book_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a book from a library. Returns `true` if it was held.
    pub async fn remove_book(
        pool: &PgPool,
        library_id: DbId,
        book_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM library_books WHERE library_id = $1 AND book_id = $2")
                .bind(library_id)
                .bind(book_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
