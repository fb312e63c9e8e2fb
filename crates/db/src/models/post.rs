//! Post entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A post joined with its author's username and its tag names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    #[serde(rename = "author")]
    pub author_id: DbId,
    pub author_username: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a post. The author is always the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePost {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub title: String,
    #[validate(custom(function = "shelfmark_core::validation::check_not_blank"))]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for updating a post. `tags`, when present, replaces the tag set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePost {
    #[validate(
        custom(function = "shelfmark_core::validation::check_not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub title: Option<String>,
    #[validate(custom(function = "shelfmark_core::validation::check_not_blank"))]
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<CreatePost> for UpdatePost {
    fn from(input: CreatePost) -> Self {
        Self {
            title: Some(input.title),
            content: Some(input.content),
            tags: Some(input.tags),
        }
    }
}
