//! Route definitions for the `/authors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::authors;
use crate::state::AppState;

/// Routes mounted at `/authors`.
///
/// ```text
/// GET, POST                  /       -> list, create
/// GET, PUT, PATCH, DELETE    /{id}   -> get_by_id, replace, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(authors::list).post(authors::create))
        .route(
            "/{id}",
            get(authors::get_by_id)
                .put(authors::replace)
                .patch(authors::update)
                .delete(authors::delete),
        )
}
