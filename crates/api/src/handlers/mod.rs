pub mod accounts;
pub mod admin;
pub mod authors;
pub mod books;
pub mod comments;
pub mod libraries;
pub mod posts;
pub mod roles;
pub mod tags;
