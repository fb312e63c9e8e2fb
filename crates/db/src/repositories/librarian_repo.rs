//! Repository for the `librarians` table.

use shelfmark_core::types::DbId;
use sqlx::PgPool;

use crate::models::librarian::{CreateLibrarian, Librarian};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, library_id, created_at, updated_at";

/// Provides operations for the one-per-library librarian.
pub struct LibrarianRepo;

impl LibrarianRepo {
    /// Appoint a librarian.
    ///
    /// A second librarian for the same library violates
    /// `uq_librarians_library_id`.
    pub async fn create(
        pool: &PgPool,
        library_id: DbId,
        input: &CreateLibrarian,
    ) -> Result<Librarian, sqlx::Error> {
        let query = format!(
            "INSERT INTO librarians (name, library_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Librarian>(&query)
            .bind(&input.name)
            .bind(library_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_library(
        pool: &PgPool,
        library_id: DbId,
    ) -> Result<Option<Librarian>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM librarians WHERE library_id = $1");
        sqlx::query_as::<_, Librarian>(&query)
            .bind(library_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove a library's librarian. Returns `true` if one existed.
    pub async fn delete_by_library(pool: &PgPool, library_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM librarians WHERE library_id = $1")
            .bind(library_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
