//! Handlers for the `/books` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelfmark_core::error::CoreError;
use shelfmark_core::listing::{BookListParams, BookQuery};
use shelfmark_core::types::DbId;
use shelfmark_db::models::book::{Book, CreateBook, UpdateBook};
use shelfmark_db::repositories::{AuthorRepo, BookRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Book", id })
}

/// A book must reference an existing author; report it on the `author` field.
async fn ensure_author_exists(pool: &sqlx::PgPool, author_id: DbId) -> AppResult<()> {
    if AuthorRepo::exists(pool, author_id).await? {
        Ok(())
    } else {
        Err(CoreError::field(
            "author",
            format!("Invalid pk \"{author_id}\" - object does not exist."),
        )
        .into())
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/books
///
/// Query parameters:
/// - `title`, `author`, `publication_year`: exact filters
/// - `search`: terms matched against title and author name
/// - `ordering`: e.g. `-publication_year,title`
/// - `limit`, `offset`: optional page window
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> AppResult<Json<Vec<Book>>> {
    let query = BookQuery::from_params(&params)?;
    let books = BookRepo::list(&state.pool, &query).await?;
    Ok(Json(books))
}

/// GET /api/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Book>> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(book))
}

/// POST /api/books/create
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    input.validate()?;
    ensure_author_exists(&state.pool, input.author).await?;

    let book = BookRepo::create(&state.pool, &input).await?;
    tracing::info!(book_id = book.id, user_id = auth.user_id, "Book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/books/{id}/update
pub async fn replace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateBook>,
) -> AppResult<Json<Book>> {
    input.validate()?;
    apply_update(&state, &auth, id, &input.into()).await
}

/// PATCH /api/books/{id}/update
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    input.validate()?;
    apply_update(&state, &auth, id, &input).await
}

async fn apply_update(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
    input: &UpdateBook,
) -> AppResult<Json<Book>> {
    if !BookRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let Some(author_id) = input.author {
        ensure_author_exists(&state.pool, author_id).await?;
    }

    let book = BookRepo::update(&state.pool, id, input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(book_id = id, user_id = auth.user_id, "Book updated");
    Ok(Json(book))
}

/// DELETE /api/books/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BookRepo::delete(&state.pool, id).await? {
        tracing::info!(book_id = id, user_id = auth.user_id, "Book deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
