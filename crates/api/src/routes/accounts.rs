//! Route definitions for the `/accounts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// POST              /register                -> register
/// POST              /login                   -> login
/// POST              /logout                  -> logout
/// GET, PUT, PATCH   /profile                 -> get_profile, replace_profile, update_profile
/// GET               /users/{id}              -> get_user
/// GET               /users/{id}/followers    -> followers
/// GET               /users/{id}/following    -> following
/// POST              /follow/{user_id}        -> follow
/// POST              /unfollow/{user_id}      -> unfollow
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/logout", post(accounts::logout))
        .route(
            "/profile",
            get(accounts::get_profile)
                .put(accounts::replace_profile)
                .patch(accounts::update_profile),
        )
        .route("/users/{id}", get(accounts::get_user))
        .route("/users/{id}/followers", get(accounts::followers))
        .route("/users/{id}/following", get(accounts::following))
        .route("/follow/{user_id}", post(accounts::follow))
        .route("/unfollow/{user_id}", post(accounts::unfollow))
}
