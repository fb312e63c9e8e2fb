//! Post tag models.

use serde::Serialize;
use shelfmark_core::types::DbId;
use sqlx::FromRow;

/// A tag with the number of posts carrying it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagWithCount {
    pub id: DbId,
    pub name: String,
    pub post_count: i64,
}
