pub mod accounts;
pub mod admin;
pub mod authors;
pub mod books;
pub mod comments;
pub mod health;
pub mod libraries;
pub mod posts;
pub mod roles;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /accounts/register                         register (public)
/// /accounts/login                            login (public)
/// /accounts/logout                           logout (token)
/// /accounts/profile                          get, put, patch (token)
/// /accounts/users/{id}                       public profile
/// /accounts/users/{id}/followers             followers
/// /accounts/users/{id}/following             following
/// /accounts/follow/{user_id}                 follow (token)
/// /accounts/unfollow/{user_id}               unfollow (token)
///
/// /authors                                   list, create (token)
/// /authors/{id}                              get, put, patch, delete (token for writes)
///
/// /books                                     list (filter, search, ordering)
/// /books/{id}                                get
/// /books/create                              create (token)
/// /books/{id}/update                         put, patch (token)
/// /books/{id}/delete                         delete (token)
///
/// /libraries                                 list, create (staff)
/// /libraries/{id}                            detail, put (staff), delete (admin)
/// /libraries/{id}/books                      add book (staff)
/// /libraries/{id}/books/{book_id}            remove book (staff)
/// /libraries/{id}/librarian                  assign, remove (staff)
///
/// /roles/admin, /roles/librarian, /roles/member   role-gated views
/// /admin/users/{id}/role                     set role (admin)
///
/// /posts                                     list (search), create (token)
/// /posts/feed                                followed authors' posts (token)
/// /posts/{id}                                get, put, patch, delete (owner writes)
/// /comments                                  list (?post=), create (token)
/// /comments/{id}                             get, put, patch, delete (owner writes)
/// /tags                                      tags with post counts
/// /tags/{name}/posts                         posts carrying a tag
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/accounts", accounts::router())
        .nest("/authors", authors::router())
        .nest("/books", books::router())
        .nest("/libraries", libraries::router())
        .nest("/roles", roles::router())
        .nest("/admin", admin::router())
        .nest("/posts", posts::router())
        .nest("/comments", comments::router())
        .nest("/tags", tags::router())
}
