//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//!
//! Token keys and their hashes live in `shelfmark_core::tokens`.

pub mod password;
