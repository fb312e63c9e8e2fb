//! Library entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::book::Book;
use crate::models::librarian::Librarian;

/// A library row from the `libraries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Library {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A library with its holdings and (optional) librarian.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryDetail {
    #[serde(flatten)]
    pub library: Library,
    pub books: Vec<Book>,
    pub librarian: Option<Librarian>,
}

/// DTO for creating or renaming a library.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLibrary {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: String,
}

/// Body of `POST /libraries/{id}/books`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddLibraryBook {
    pub book_id: DbId,
}
