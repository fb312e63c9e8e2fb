//! Integration tests for the catalog repositories (authors, books,
//! libraries, librarians).
//!
//! Exercises:
//! - Cascade delete from author to books
//! - Book filtering, term search, ordering and pagination
//! - Library book membership and the one-librarian constraint

use shelfmark_core::listing::{BookListParams, BookQuery};
use shelfmark_db::models::author::{CreateAuthor, UpdateAuthor};
use shelfmark_db::models::book::{CreateBook, UpdateBook};
use shelfmark_db::models::librarian::CreateLibrarian;
use shelfmark_db::models::library::CreateLibrary;
use shelfmark_db::repositories::{AuthorRepo, BookRepo, LibrarianRepo, LibraryRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn author(pool: &PgPool, name: &str) -> i64 {
    AuthorRepo::create(
        pool,
        &CreateAuthor {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn book(pool: &PgPool, author: i64, title: &str, year: i32) -> i64 {
    BookRepo::create(
        pool,
        &CreateBook {
            title: title.to_string(),
            publication_year: year,
            author,
        },
    )
    .await
    .unwrap()
    .id
}

fn query(params: BookListParams) -> BookQuery {
    BookQuery::from_params(&params).unwrap()
}

fn titles(books: &[shelfmark_db::models::book::Book]) -> Vec<&str> {
    books.iter().map(|b| b.title.as_str()).collect()
}

/// Seed: two authors with three books between them.
async fn seed(pool: &PgPool) -> (i64, i64) {
    let orwell = author(pool, "George Orwell").await;
    let huxley = author(pool, "Aldous Huxley").await;
    book(pool, orwell, "Nineteen Eighty-Four", 1949).await;
    book(pool, orwell, "Animal Farm", 1945).await;
    book(pool, huxley, "Brave New World", 1932).await;
    (orwell, huxley)
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn author_with_books_nests_and_counts(pool: PgPool) {
    let (orwell, _) = seed(&pool).await;

    let found = AuthorRepo::find_with_books(&pool, orwell)
        .await
        .unwrap()
        .expect("author should exist");
    assert_eq!(found.name, "George Orwell");
    assert_eq!(found.book_count, 2);
    assert_eq!(titles(&found.books), vec!["Animal Farm", "Nineteen Eighty-Four"]);

    let all = AuthorRepo::list_with_books(&pool).await.unwrap();
    let names: Vec<_> = all.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Aldous Huxley", "George Orwell"]);
    assert_eq!(all[0].book_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_author_cascades_books(pool: PgPool) {
    let (orwell, _) = seed(&pool).await;
    assert_eq!(BookRepo::count(&pool).await.unwrap(), 3);

    assert!(AuthorRepo::delete(&pool, orwell).await.unwrap());
    assert_eq!(BookRepo::count(&pool).await.unwrap(), 1);
    assert!(!AuthorRepo::delete(&pool, orwell).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn author_update_keeps_unset_fields(pool: PgPool) {
    let id = author(&pool, "Eric Blair").await;

    let unchanged = AuthorRepo::update(&pool, id, &UpdateAuthor::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Eric Blair");

    let renamed = AuthorRepo::update(
        &pool,
        id,
        &UpdateAuthor {
            name: Some("George Orwell".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "George Orwell");

    assert!(AuthorRepo::update(&pool, id + 1000, &UpdateAuthor::default())
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn book_with_unknown_author_is_fk_violation(pool: PgPool) {
    let err = BookRepo::create(
        &pool,
        &CreateBook {
            title: "Orphan".to_string(),
            publication_year: 2000,
            author: 999_999,
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "./migrations")]
async fn book_year_below_minimum_violates_check(pool: PgPool) {
    let orwell = author(&pool, "George Orwell").await;
    let result = BookRepo::create(
        &pool,
        &CreateBook {
            title: "Incunable".to_string(),
            publication_year: 1200,
            author: orwell,
        },
    )
    .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_defaults_to_title_order(pool: PgPool) {
    seed(&pool).await;
    let books = BookRepo::list(&pool, &BookQuery::default()).await.unwrap();
    assert_eq!(
        titles(&books),
        vec!["Animal Farm", "Brave New World", "Nineteen Eighty-Four"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_exactly(pool: PgPool) {
    let (orwell, _) = seed(&pool).await;

    let by_author = BookRepo::list(
        &pool,
        &query(BookListParams {
            author: Some(orwell.to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(titles(&by_author), vec!["Animal Farm", "Nineteen Eighty-Four"]);

    let by_year = BookRepo::list(
        &pool,
        &query(BookListParams {
            publication_year: Some("1932".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(titles(&by_year), vec!["Brave New World"]);

    // Exact title match only: a prefix does not match.
    let by_title = BookRepo::list(
        &pool,
        &query(BookListParams {
            title: Some("Animal".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert!(by_title.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn search_matches_title_or_author_for_every_term(pool: PgPool) {
    seed(&pool).await;

    let by_author_name = BookRepo::list(
        &pool,
        &query(BookListParams {
            search: Some("orwell".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(by_author_name.len(), 2);

    // Both terms must match; "farm" narrows Orwell's books to one.
    let narrowed = BookRepo::list(
        &pool,
        &query(BookListParams {
            search: Some("orwell, FARM".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(titles(&narrowed), vec!["Animal Farm"]);

    let none = BookRepo::list(
        &pool,
        &query(BookListParams {
            search: Some("huxley farm".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn search_treats_wildcards_literally(pool: PgPool) {
    let a = author(&pool, "Anon").await;
    book(&pool, a, "100% Pure", 2001).await;
    book(&pool, a, "1000 Pure", 2002).await;

    let books = BookRepo::list(
        &pool,
        &query(BookListParams {
            search: Some("100%".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(titles(&books), vec!["100% Pure"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn ordering_descending_and_unknown_fields(pool: PgPool) {
    seed(&pool).await;

    let newest = BookRepo::list(
        &pool,
        &query(BookListParams {
            ordering: Some("-publication_year".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(
        titles(&newest),
        vec!["Nineteen Eighty-Four", "Animal Farm", "Brave New World"]
    );

    let fallback = BookRepo::list(
        &pool,
        &query(BookListParams {
            ordering: Some("price".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(
        titles(&fallback),
        vec!["Animal Farm", "Brave New World", "Nineteen Eighty-Four"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn list_paginates(pool: PgPool) {
    seed(&pool).await;

    let page = BookRepo::list(
        &pool,
        &query(BookListParams {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(titles(&page), vec!["Brave New World", "Nineteen Eighty-Four"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn book_partial_update(pool: PgPool) {
    let (orwell, huxley) = seed(&pool).await;
    let id = book(&pool, orwell, "Burmese Days", 1934).await;

    let moved = BookRepo::update(
        &pool,
        id,
        &UpdateBook {
            author: Some(huxley),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.author_id, huxley);
    assert_eq!(moved.title, "Burmese Days");
    assert_eq!(moved.publication_year, 1934);
}

// ---------------------------------------------------------------------------
// Libraries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn library_books_and_librarian(pool: PgPool) {
    let orwell = author(&pool, "George Orwell").await;
    let farm = book(&pool, orwell, "Animal Farm", 1945).await;

    let library = LibraryRepo::create(
        &pool,
        &CreateLibrary {
            name: "Central".to_string(),
        },
    )
    .await
    .unwrap();

    LibraryRepo::add_book(&pool, library.id, farm).await.unwrap();
    // Adding twice is a no-op.
    LibraryRepo::add_book(&pool, library.id, farm).await.unwrap();

    let librarian = LibrarianRepo::create(
        &pool,
        library.id,
        &CreateLibrarian {
            name: "Rupert Giles".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(librarian.library_id, library.id);

    let detail = LibraryRepo::find_detail(&pool, library.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(titles(&detail.books), vec!["Animal Farm"]);
    assert_eq!(detail.librarian.map(|l| l.name).as_deref(), Some("Rupert Giles"));

    assert!(LibraryRepo::remove_book(&pool, library.id, farm).await.unwrap());
    assert!(!LibraryRepo::remove_book(&pool, library.id, farm).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn second_librarian_is_unique_violation(pool: PgPool) {
    let library = LibraryRepo::create(
        &pool,
        &CreateLibrary {
            name: "Sunnydale High".to_string(),
        },
    )
    .await
    .unwrap();
    let input = CreateLibrarian {
        name: "Rupert Giles".to_string(),
    };

    LibrarianRepo::create(&pool, library.id, &input).await.unwrap();
    let err = LibrarianRepo::create(&pool, library.id, &input)
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_librarians_library_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_library_keeps_books(pool: PgPool) {
    let orwell = author(&pool, "George Orwell").await;
    let farm = book(&pool, orwell, "Animal Farm", 1945).await;
    let library = LibraryRepo::create(
        &pool,
        &CreateLibrary {
            name: "Central".to_string(),
        },
    )
    .await
    .unwrap();
    LibraryRepo::add_book(&pool, library.id, farm).await.unwrap();

    assert!(LibraryRepo::delete(&pool, library.id).await.unwrap());
    assert!(BookRepo::exists(&pool, farm).await.unwrap());
    assert!(LibrarianRepo::find_by_library(&pool, library.id)
        .await
        .unwrap()
        .is_none());
}
