//! HTTP-level integration tests for `/api/authors` and `/api/books`:
//! validation, filtering, search, ordering and cascades.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_author, create_book, delete, delete_auth, expect_json, get, patch_json,
    patch_json_auth, post_json, post_json_auth, put_json, put_json_auth, register,
};
use serde_json::{json, Value};
use sqlx::PgPool;

fn titles(json: &Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

/// Two authors and three books; returns the token plus author ids.
async fn seed(app: &common::App) -> (String, i64, i64) {
    let user = register(app, "librarian").await;
    let orwell = create_author(app, &user.token, "George Orwell").await;
    let huxley = create_author(app, &user.token, "Aldous Huxley").await;
    create_book(app, &user.token, orwell, "Nineteen Eighty-Four", 1949).await;
    create_book(app, &user.token, orwell, "Animal Farm", 1945).await;
    create_book(app, &user.token, huxley, "Brave New World", 1932).await;
    (user.token, orwell, huxley)
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn author_detail_nests_books(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, orwell, _) = seed(&app).await;

    let json = expect_json(
        get(app.clone(), &format!("/api/authors/{orwell}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["name"], "George Orwell");
    assert_eq!(json["book_count"], 2);
    assert_eq!(json["books"][0]["title"], "Animal Farm");
    assert_eq!(json["books"][0]["author"], orwell);

    let list = expect_json(get(app, "/api/authors").await, StatusCode::OK).await;
    assert_eq!(list[0]["name"], "Aldous Huxley");
    assert_eq!(list[1]["book_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn author_writes_require_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/authors", json!({ "name": "Anonymous" })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn author_blank_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "writer").await;
    let json = expect_json(
        post_json_auth(app, "/api/authors", &user.token, json!({ "name": "" })).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(json["fields"]["name"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn whitespace_only_names_and_titles_are_blank(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "writer").await;

    let json = expect_json(
        post_json_auth(app.clone(), "/api/authors", &user.token, json!({ "name": "   " })).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "This field may not be blank.");

    let author = create_author(&app, &user.token, "George Orwell").await;
    let body = json!({ "title": " \t ", "publication_year": 1945, "author": author });
    let json = expect_json(
        post_json_auth(app.clone(), "/api/books/create", &user.token, body).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["fields"]["title"][0], "This field may not be blank.");

    let renamed = patch_json_auth(
        app,
        &format!("/api/authors/{author}"),
        &user.token,
        json!({ "name": "  " }),
    )
    .await;
    assert_eq!(renamed.status(), StatusCode::BAD_REQUEST);
}

/// Rows that slip past request validation still map to a 400, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn check_violation_renders_as_validation_error(pool: PgPool) {
    use axum::response::IntoResponse;
    use shelfmark_api::error::AppError;
    use shelfmark_db::models::author::CreateAuthor;
    use shelfmark_db::repositories::AuthorRepo;

    let input = CreateAuthor {
        name: "   ".to_string(),
    };
    let err = AuthorRepo::create(&pool, &input).await.unwrap_err();

    let response = AppError::from(err).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_author_cascades_books(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, orwell, _) = seed(&app).await;

    let response = delete_auth(app.clone(), &format!("/api/authors/{orwell}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let books = body_json(get(app.clone(), "/api/books").await).await;
    assert_eq!(titles(&books), vec!["Brave New World"]);

    let again = delete_auth(app, &format!("/api/authors/{orwell}"), &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn author_put_and_patch(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "editor").await;
    let id = create_author(&app, &user.token, "Eric Blair").await;
    let uri = format!("/api/authors/{id}");

    let missing_name = put_json_auth(app.clone(), &uri, &user.token, json!({})).await;
    assert!(missing_name.status().is_client_error());

    let renamed = expect_json(
        patch_json_auth(app, &uri, &user.token, json!({ "name": "George Orwell" })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(renamed["name"], "George Orwell");
    assert_eq!(renamed["book_count"], 0);
}

// ---------------------------------------------------------------------------
// Book validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn publication_year_bounds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "checker").await;
    let author = create_author(&app, &user.token, "Someone").await;

    for (year, fragment) in [(9999, "cannot be in the future"), (1200, "seems unrealistic")] {
        let body = json!({ "title": "Dated", "publication_year": year, "author": author });
        let json = expect_json(
            post_json_auth(app.clone(), "/api/books/create", &user.token, body).await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        let message = json["fields"]["publication_year"][0].as_str().unwrap();
        assert!(message.contains(fragment), "year {year}: {message}");
    }

    // The lower bound itself is accepted.
    create_book(&app, &user.token, author, "Gutenberg Bible", 1450).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn book_requires_existing_author(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "checker").await;

    let body = json!({ "title": "Orphan", "publication_year": 2000, "author": 999_999 });
    let json = expect_json(
        post_json_auth(app, "/api/books/create", &user.token, body).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(json["fields"]["author"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn book_create_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "title": "Sneaky", "publication_year": 2000, "author": 1 });
    let response = post_json(app, "/api/books/create", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn anonymous_book_writes_change_nothing(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "owner").await;
    let author = create_author(&app, &user.token, "George Orwell").await;
    let id = create_book(&app, &user.token, author, "Animal Farm", 1945).await;
    let update_uri = format!("/api/books/{id}/update");
    let before = body_json(get(app.clone(), &format!("/api/books/{id}")).await).await;

    let body = json!({ "title": "Pig Farm", "publication_year": 1950, "author": author });
    let put = put_json(app.clone(), &update_uri, body).await;
    assert_eq!(put.status(), StatusCode::FORBIDDEN);

    let patch = patch_json(app.clone(), &update_uri, json!({ "title": "Pig Farm" })).await;
    assert_eq!(patch.status(), StatusCode::FORBIDDEN);

    let removed = delete(app.clone(), &format!("/api/books/{id}/delete")).await;
    assert_eq!(removed.status(), StatusCode::FORBIDDEN);

    let after = expect_json(get(app, &format!("/api/books/{id}")).await, StatusCode::OK).await;
    assert_eq!(after, before);
    assert_eq!(after["title"], "Animal Farm");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn trailing_slash_paths_resolve(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "writer").await;
    let author = create_author(&app, &user.token, "Aldous Huxley").await;

    let body = json!({ "title": "Island", "publication_year": 1962, "author": author });
    let created = expect_json(
        post_json_auth(app.clone(), "/api/books/create/", &user.token, body).await,
        StatusCode::CREATED,
    )
    .await;

    let listed = expect_json(get(app.clone(), "/api/books/").await, StatusCode::OK).await;
    assert_eq!(titles(&listed), vec!["Island"]);

    let detail = get(app, &format!("/api/books/{}/", created["id"])).await;
    assert_eq!(detail.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_search_and_ordering(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, orwell, _) = seed(&app).await;

    let default = body_json(get(app.clone(), "/api/books").await).await;
    assert_eq!(
        titles(&default),
        vec!["Animal Farm", "Brave New World", "Nineteen Eighty-Four"]
    );

    let by_author = body_json(get(app.clone(), &format!("/api/books?author={orwell}")).await).await;
    assert_eq!(titles(&by_author), vec!["Animal Farm", "Nineteen Eighty-Four"]);

    let by_year = body_json(get(app.clone(), "/api/books?publication_year=1932").await).await;
    assert_eq!(titles(&by_year), vec!["Brave New World"]);

    let searched = body_json(get(app.clone(), "/api/books?search=orwell%20farm").await).await;
    assert_eq!(titles(&searched), vec!["Animal Farm"]);

    let newest = body_json(get(app.clone(), "/api/books?ordering=-publication_year").await).await;
    assert_eq!(
        titles(&newest),
        vec!["Nineteen Eighty-Four", "Animal Farm", "Brave New World"]
    );

    let ignored = body_json(get(app.clone(), "/api/books?ordering=price").await).await;
    assert_eq!(titles(&ignored), titles(&default));

    let paged = body_json(get(app, "/api/books?limit=1&offset=2").await).await;
    assert_eq!(titles(&paged), vec!["Nineteen Eighty-Four"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_filters_are_field_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = expect_json(
        get(app, "/api/books?author=abc&publication_year=soon").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["fields"]["author"][0], "Enter a number.");
    assert_eq!(json["fields"]["publication_year"][0], "Enter a number.");
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn book_put_patch_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, orwell, huxley) = seed(&app).await;
    let id = create_book(&app, &token, orwell, "Burmese Days", 1934).await;
    let update_uri = format!("/api/books/{id}/update");

    // PATCH: partial.
    let patched = expect_json(
        patch_json_auth(app.clone(), &update_uri, &token, json!({ "publication_year": 1935 })).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(patched["publication_year"], 1935);
    assert_eq!(patched["title"], "Burmese Days");

    // PUT: every field required.
    let partial_put = put_json_auth(app.clone(), &update_uri, &token, json!({ "title": "X" })).await;
    assert!(partial_put.status().is_client_error());

    let replaced = expect_json(
        put_json_auth(
            app.clone(),
            &update_uri,
            &token,
            json!({ "title": "Island", "publication_year": 1962, "author": huxley }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(replaced["author"], huxley);

    let bad_year = patch_json_auth(app.clone(), &update_uri, &token, json!({ "publication_year": 1000 })).await;
    assert_eq!(bad_year.status(), StatusCode::BAD_REQUEST);

    let deleted = delete_auth(app.clone(), &format!("/api/books/{id}/delete"), &token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get(app, &format!("/api/books/{id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
