//! Route definitions for `/admin`.

use axum::routing::put;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin` (all require the `Admin` role).
///
/// ```text
/// PUT   /users/{id}/role   -> set_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users/{id}/role", put(admin::set_role))
}
