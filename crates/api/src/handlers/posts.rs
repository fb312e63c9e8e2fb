//! Handlers for the `/posts` resource and the follow feed.
//!
//! Every endpoint requires a token. Only the author may change or delete a
//! post.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelfmark_core::error::CoreError;
use shelfmark_core::permissions::ensure_owner;
use shelfmark_core::tags::normalize_tags;
use shelfmark_core::types::DbId;
use shelfmark_db::models::post::{CreatePost, Post, UpdatePost};
use shelfmark_db::repositories::PostRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{PaginationParams, SearchParams};
use crate::state::AppState;

async fn ensure_post_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Post> {
    PostRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))
}

/// GET /api/posts
///
/// Newest first. `search` terms must each match the title or the content.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = PostRepo::list(&state.pool, &params.terms(), &params.page()).await?;
    Ok(Json(posts))
}

/// GET /api/posts/feed
///
/// Posts by users the caller follows, newest first.
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = PostRepo::feed(&state.pool, auth.user_id, &params.page()).await?;
    Ok(Json(posts))
}

/// POST /api/posts
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<Post>)> {
    input.validate()?;
    input.tags = normalize_tags(&input.tags)?;

    let post = PostRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(post_id = post.id, user_id = auth.user_id, tags = post.tags.len(), "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Post>> {
    Ok(Json(ensure_post_exists(&state.pool, id).await?))
}

/// PUT /api/posts/{id}
pub async fn replace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreatePost>,
) -> AppResult<Json<Post>> {
    input.validate()?;
    apply_update(&state, &auth, id, input.into()).await
}

/// PATCH /api/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<Post>> {
    input.validate()?;
    apply_update(&state, &auth, id, input).await
}

async fn apply_update(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
    mut input: UpdatePost,
) -> AppResult<Json<Post>> {
    let existing = ensure_post_exists(&state.pool, id).await?;
    ensure_owner(existing.author_id, auth.user_id)?;

    if let Some(tags) = input.tags.take() {
        input.tags = Some(normalize_tags(&tags)?);
    }

    let post = PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;
    tracing::info!(post_id = id, user_id = auth.user_id, "Post updated");
    Ok(Json(post))
}

/// DELETE /api/posts/{id}
///
/// Comments on the post are deleted with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ensure_post_exists(&state.pool, id).await?;
    ensure_owner(existing.author_id, auth.user_id)?;

    PostRepo::delete(&state.pool, id).await?;
    tracing::info!(post_id = id, user_id = auth.user_id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}
