//! Handlers for the `/authors` resource.
//!
//! Authors are always returned with their nested books and a book count.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelfmark_core::error::CoreError;
use shelfmark_core::types::DbId;
use shelfmark_db::models::author::{AuthorWithBooks, CreateAuthor, UpdateAuthor};
use shelfmark_db::repositories::AuthorRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Author",
        id,
    })
}

/// GET /api/authors
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<AuthorWithBooks>>> {
    let authors = AuthorRepo::list_with_books(&state.pool).await?;
    Ok(Json(authors))
}

/// POST /api/authors
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<AuthorWithBooks>)> {
    input.validate()?;
    let author = AuthorRepo::create(&state.pool, &input).await?;
    tracing::info!(author_id = author.id, user_id = auth.user_id, "Author created");
    Ok((
        StatusCode::CREATED,
        Json(AuthorWithBooks::new(author, Vec::new())),
    ))
}

/// GET /api/authors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AuthorWithBooks>> {
    let author = AuthorRepo::find_with_books(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(author))
}

/// PUT /api/authors/{id}
pub async fn replace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateAuthor>,
) -> AppResult<Json<AuthorWithBooks>> {
    input.validate()?;
    apply_update(&state, &auth, id, &input.into()).await
}

/// PATCH /api/authors/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAuthor>,
) -> AppResult<Json<AuthorWithBooks>> {
    input.validate()?;
    apply_update(&state, &auth, id, &input).await
}

async fn apply_update(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
    input: &UpdateAuthor,
) -> AppResult<Json<AuthorWithBooks>> {
    AuthorRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(author_id = id, user_id = auth.user_id, "Author updated");

    let author = AuthorRepo::find_with_books(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(author))
}

/// DELETE /api/authors/{id}
///
/// Deletes the author's books with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AuthorRepo::delete(&state.pool, id).await? {
        tracing::info!(author_id = id, user_id = auth.user_id, "Author deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
