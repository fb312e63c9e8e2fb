//! Handlers for the `/comments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelfmark_core::error::CoreError;
use shelfmark_core::permissions::ensure_owner;
use shelfmark_core::types::DbId;
use shelfmark_db::models::comment::{Comment, CreateComment, UpdateComment};
use shelfmark_db::repositories::{CommentRepo, PostRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::CommentListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comment",
        id,
    })
}

/// Load a comment and check the caller wrote it.
async fn ensure_own_comment(pool: &sqlx::PgPool, id: DbId, user_id: DbId) -> AppResult<Comment> {
    let comment = CommentRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_owner(comment.author_id, user_id)?;
    Ok(comment)
}

/// GET /api/comments?post={id}
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<Vec<Comment>>> {
    let comments = CommentRepo::list(&state.pool, params.post_id()?, &params.page()).await?;
    Ok(Json(comments))
}

/// POST /api/comments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    input.validate()?;
    if !PostRepo::exists(&state.pool, input.post).await? {
        return Err(CoreError::field(
            "post",
            format!("Invalid pk \"{}\" - object does not exist.", input.post),
        )
        .into());
    }

    let comment = CommentRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(comment_id = comment.id, post_id = input.post, user_id = auth.user_id, "Comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/comments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Comment>> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(comment))
}

/// PUT /api/comments/{id}
///
/// `content` is required.
pub async fn replace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<Comment>> {
    if input.content.is_none() {
        return Err(CoreError::field("content", "This field is required.").into());
    }
    update(State(state), auth, Path(id), Json(input)).await
}

/// PATCH /api/comments/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<Comment>> {
    input.validate()?;
    ensure_own_comment(&state.pool, id, auth.user_id).await?;

    let comment = CommentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment updated");
    Ok(Json(comment))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_own_comment(&state.pool, id, auth.user_id).await?;
    CommentRepo::delete(&state.pool, id).await?;
    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
