//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from an `Authorization: Token <key>` header.
//! - [`rbac::RequireAdmin`] -- Requires the `Admin` profile role.
//! - [`rbac::RequireLibrarian`] -- Requires the `Librarian` profile role.
//! - [`rbac::RequireMember`] -- Requires the `Member` profile role.
//! - [`rbac::RequireStaff`] -- Requires `Admin` or `Librarian`.

pub mod auth;
pub mod rbac;
