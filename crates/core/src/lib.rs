//! Domain logic for the Shelfmark service.
//!
//! Nothing in this crate performs I/O: the database and HTTP layers call
//! into it for validation, query parsing, roles and token handling.

pub mod error;
pub mod listing;
pub mod permissions;
pub mod roles;
pub mod tags;
pub mod tokens;
pub mod types;
pub mod validation;
