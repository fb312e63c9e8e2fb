//! Route definitions for the `/libraries` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::libraries;
use crate::state::AppState;

/// Routes mounted at `/libraries`.
///
/// ```text
/// GET, POST            /                        -> list, create
/// GET, PUT, DELETE     /{id}                    -> get_by_id, update, delete
/// POST                 /{id}/books              -> add_book
/// DELETE               /{id}/books/{book_id}    -> remove_book
/// POST, DELETE         /{id}/librarian          -> assign_librarian, remove_librarian
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(libraries::list).post(libraries::create))
        .route(
            "/{id}",
            get(libraries::get_by_id)
                .put(libraries::update)
                .delete(libraries::delete),
        )
        .route("/{id}/books", post(libraries::add_book))
        .route("/{id}/books/{book_id}", delete(libraries::remove_book))
        .route(
            "/{id}/librarian",
            post(libraries::assign_librarian).delete(libraries::remove_librarian),
        )
}
