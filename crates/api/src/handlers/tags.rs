//! Handlers for the public `/tags` resource.

use axum::extract::{Path, State};
use axum::Json;
use shelfmark_core::tags::normalize_tag;
use shelfmark_db::models::post::Post;
use shelfmark_db::models::tag::TagWithCount;
use shelfmark_db::repositories::{PostRepo, TagRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/tags
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TagWithCount>>> {
    Ok(Json(TagRepo::list_with_counts(&state.pool).await?))
}

/// GET /api/tags/{name}/posts
///
/// The name is normalized first, so `/tags/Rust/posts` finds posts tagged
/// `rust`. An unknown tag yields an empty list.
pub async fn posts(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = PostRepo::list_by_tag(&state.pool, &normalize_tag(&name)).await?;
    Ok(Json(posts))
}
