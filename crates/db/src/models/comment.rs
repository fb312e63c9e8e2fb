//! Comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelfmark_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A comment joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    #[serde(rename = "post")]
    pub post_id: DbId,
    #[serde(rename = "author")]
    pub author_id: DbId,
    pub author_username: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment on an existing post.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    pub post: DbId,
    #[validate(custom(function = "shelfmark_core::validation::check_not_blank"))]
    pub content: String,
}

/// DTO for editing a comment. Post and author are fixed after creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateComment {
    #[validate(custom(function = "shelfmark_core::validation::check_not_blank"))]
    pub content: Option<String>,
}
