//! Route definitions for the `/posts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET, POST                  /        -> list, create
/// GET                        /feed    -> feed
/// GET, PUT, PATCH, DELETE    /{id}    -> get_by_id, replace, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list).post(posts::create))
        .route("/feed", get(posts::feed))
        .route(
            "/{id}",
            get(posts::get_by_id)
                .put(posts::replace)
                .patch(posts::update)
                .delete(posts::delete),
        )
}
