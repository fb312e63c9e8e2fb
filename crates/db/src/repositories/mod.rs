//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod author_repo;
pub mod book_repo;
pub mod comment_repo;
pub mod follow_repo;
pub mod librarian_repo;
pub mod library_repo;
pub mod post_repo;
pub mod profile_repo;
pub mod tag_repo;
pub mod token_repo;
pub mod user_repo;

pub use author_repo::AuthorRepo;
pub use book_repo::BookRepo;
pub use comment_repo::CommentRepo;
pub use follow_repo::FollowRepo;
pub use librarian_repo::LibrarianRepo;
pub use library_repo::LibraryRepo;
pub use post_repo::PostRepo;
pub use profile_repo::ProfileRepo;
pub use tag_repo::TagRepo;
pub use token_repo::TokenRepo;
pub use user_repo::UserRepo;

/// Render `LIMIT $n OFFSET $n+1`. A `NULL` limit binds as `LIMIT ALL`.
pub(crate) fn page_sql(bind_idx: u32) -> String {
    format!("LIMIT ${bind_idx} OFFSET ${}", bind_idx + 1)
}
