//! Route definitions for the `/books` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// Routes mounted at `/books`.
///
/// ```text
/// GET          /              -> list
/// POST         /create        -> create
/// GET          /{id}          -> get_by_id
/// PUT, PATCH   /{id}/update   -> replace, update
/// DELETE       /{id}/delete   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list))
        .route("/create", post(books::create))
        .route("/{id}", get(books::get_by_id))
        .route("/{id}/update", put(books::replace).patch(books::update))
        .route("/{id}/delete", delete(books::delete))
}
