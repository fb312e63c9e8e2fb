//! Route definitions for the role-gated `/roles` views.

use axum::routing::get;
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// Routes mounted at `/roles`.
///
/// ```text
/// GET   /admin       -> admin_view (Admin)
/// GET   /librarian   -> librarian_view (Librarian)
/// GET   /member      -> member_view (Member)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(roles::admin_view))
        .route("/librarian", get(roles::librarian_view))
        .route("/member", get(roles::member_view))
}
