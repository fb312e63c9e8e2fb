//! Author entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::book::Book;

/// An author row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Author representation with nested, read-only books.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorWithBooks {
    pub id: DbId,
    pub name: String,
    pub books: Vec<Book>,
    pub book_count: usize,
}

impl AuthorWithBooks {
    pub fn new(author: Author, books: Vec<Book>) -> Self {
        Self {
            id: author.id,
            name: author.name,
            book_count: books.len(),
            books,
        }
    }
}

/// DTO for creating (or fully replacing) an author.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAuthor {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: String,
}

/// DTO for partially updating an author.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAuthor {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: Option<String>,
}

impl From<CreateAuthor> for UpdateAuthor {
    fn from(input: CreateAuthor) -> Self {
        Self {
            name: Some(input.name),
        }
    }
}
