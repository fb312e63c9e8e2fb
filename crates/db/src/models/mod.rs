//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts (also used for full
//!   replacement on `PUT`)
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for `PATCH`

pub mod author;
pub mod book;
pub mod comment;
pub mod librarian;
pub mod library;
pub mod post;
pub mod profile;
pub mod tag;
pub mod token;
pub mod user;
