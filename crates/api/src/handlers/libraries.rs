//! Handlers for the `/libraries` resource: holdings and the librarian.
//!
//! Reads are public. Writes require a staff role (`Admin` or `Librarian`);
//! deleting a library requires `Admin`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelfmark_core::error::CoreError;
use shelfmark_core::types::DbId;
use shelfmark_db::models::librarian::{CreateLibrarian, Librarian};
use shelfmark_db::models::library::{AddLibraryBook, CreateLibrary, Library, LibraryDetail};
use shelfmark_db::repositories::{BookRepo, LibrarianRepo, LibraryRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Library",
        id,
    })
}

async fn ensure_library_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Library> {
    LibraryRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/libraries
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Library>>> {
    Ok(Json(LibraryRepo::list(&state.pool).await?))
}

/// POST /api/libraries
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateLibrary>,
) -> AppResult<(StatusCode, Json<Library>)> {
    input.validate()?;
    let library = LibraryRepo::create(&state.pool, &input).await?;
    tracing::info!(library_id = library.id, user_id = user.user_id, "Library created");
    Ok((StatusCode::CREATED, Json(library)))
}

/// GET /api/libraries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<LibraryDetail>> {
    let detail = LibraryRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(detail))
}

/// PUT /api/libraries/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<CreateLibrary>,
) -> AppResult<Json<Library>> {
    input.validate()?;
    let library = LibraryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(library_id = id, user_id = user.user_id, "Library updated");
    Ok(Json(library))
}

/// DELETE /api/libraries/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LibraryRepo::delete(&state.pool, id).await? {
        tracing::info!(library_id = id, user_id = user.user_id, "Library deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/libraries/{id}/books
///
/// Adding a book the library already holds is a no-op.
pub async fn add_book(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<AddLibraryBook>,
) -> AppResult<StatusCode> {
    ensure_library_exists(&state.pool, id).await?;
    if !BookRepo::exists(&state.pool, input.book_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: input.book_id,
        }));
    }

    LibraryRepo::add_book(&state.pool, id, input.book_id).await?;
    tracing::info!(library_id = id, book_id = input.book_id, user_id = user.user_id, "Book added to library");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/libraries/{id}/books/{book_id}
pub async fn remove_book(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path((id, book_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_library_exists(&state.pool, id).await?;
    if LibraryRepo::remove_book(&state.pool, id, book_id).await? {
        tracing::info!(library_id = id, book_id, user_id = user.user_id, "Book removed from library");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: book_id,
        }))
    }
}

/// POST /api/libraries/{id}/librarian
///
/// A library has at most one librarian; a second assignment is a conflict.
pub async fn assign_librarian(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<CreateLibrarian>,
) -> AppResult<(StatusCode, Json<Librarian>)> {
    input.validate()?;
    ensure_library_exists(&state.pool, id).await?;

    if LibrarianRepo::find_by_library(&state.pool, id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "This library already has a librarian.".into(),
        )));
    }

    let librarian = LibrarianRepo::create(&state.pool, id, &input).await?;
    tracing::info!(library_id = id, librarian_id = librarian.id, user_id = user.user_id, "Librarian assigned");
    Ok((StatusCode::CREATED, Json(librarian)))
}

/// DELETE /api/libraries/{id}/librarian
pub async fn remove_librarian(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_library_exists(&state.pool, id).await?;
    if LibrarianRepo::delete_by_library(&state.pool, id).await? {
        tracing::info!(library_id = id, user_id = user.user_id, "Librarian removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Librarian",
            id,
        }))
    }
}
