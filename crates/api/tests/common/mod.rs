//! Shared helpers for the api integration tests.
//!
//! Every test builds the production service via [`build_app_router`] and
//! drives it with `tower::ServiceExt::oneshot`, so no socket is bound.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use shelfmark_api::config::ServerConfig;
pub use shelfmark_api::router::App;
use shelfmark_api::router::build_app_router;
use shelfmark_api::state::AppState;
use shelfmark_db::repositories::ProfileRepo;

/// Password used for every user registered through [`register`].
pub const TEST_PASSWORD: &str = "s3cret-pass";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> App {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: App,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: App, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: App, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: App, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: App, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: App, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: App, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: App, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: App, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn patch_json(app: App, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, None, Some(body)).await
}

pub async fn delete(app: App, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: App, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert `status`, then return the body as JSON.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A registered user and its token key.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Register `username` through the API.
pub async fn register(app: &App, username: &str) -> TestUser {
    let body = json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": TEST_PASSWORD,
        "password_confirm": TEST_PASSWORD,
    });
    let json = expect_json(
        post_json(app.clone(), "/api/accounts/register", body).await,
        StatusCode::CREATED,
    )
    .await;
    TestUser {
        id: json["user"]["id"].as_i64().unwrap(),
        token: json["token"].as_str().unwrap().to_string(),
    }
}

/// Register `username` and give it `role` directly in the database.
pub async fn register_with_role(app: &App, pool: &PgPool, username: &str, role: &str) -> TestUser {
    let user = register(app, username).await;
    ProfileRepo::set_role(pool, user.id, role)
        .await
        .unwrap()
        .expect("profile exists");
    user
}

/// Create an author through the API, returning its id.
pub async fn create_author(app: &App, token: &str, name: &str) -> i64 {
    let json = expect_json(
        post_json_auth(app.clone(), "/api/authors", token, json!({ "name": name })).await,
        StatusCode::CREATED,
    )
    .await;
    json["id"].as_i64().unwrap()
}

/// Create a book through the API, returning its id.
pub async fn create_book(app: &App, token: &str, author: i64, title: &str, year: i32) -> i64 {
    let body = json!({ "title": title, "publication_year": year, "author": author });
    let json = expect_json(
        post_json_auth(app.clone(), "/api/books/create", token, body).await,
        StatusCode::CREATED,
    )
    .await;
    json["id"].as_i64().unwrap()
}
