//! Book entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A book row from the `books` table.
///
/// The author reference serializes as `"author": <id>`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub publication_year: i32,
    #[serde(rename = "author")]
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a book. Also the body of a full `PUT` update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub title: String,
    #[validate(custom(
        function = "shelfmark_core::validation::publication::check_publication_year"
    ))]
    pub publication_year: i32,
    /// Id of an existing author.
    pub author: DbId,
}

/// DTO for a partial (`PATCH`) book update. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub title: Option<String>,
    #[validate(custom(
        function = "shelfmark_core::validation::publication::check_publication_year"
    ))]
    pub publication_year: Option<i32>,
    pub author: Option<DbId>,
}

impl From<CreateBook> for UpdateBook {
    fn from(input: CreateBook) -> Self {
        Self {
            title: Some(input.title),
            publication_year: Some(input.publication_year),
            author: Some(input.author),
        }
    }
}
