//! Librarian entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A librarian row from the `librarians` table. One per library.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Librarian {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "library")]
    pub library_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appointing a librarian. The library comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLibrarian {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: String,
}
