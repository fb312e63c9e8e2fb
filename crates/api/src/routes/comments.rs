//! Route definitions for the `/comments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET, POST                  /        -> list (?post=), create
/// GET, PUT, PATCH, DELETE    /{id}    -> get_by_id, replace, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comments::list).post(comments::create))
        .route(
            "/{id}",
            get(comments::get_by_id)
                .put(comments::replace)
                .patch(comments::update)
                .delete(comments::delete),
        )
}
