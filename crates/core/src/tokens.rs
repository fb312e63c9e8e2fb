//! Opaque authentication tokens.
//!
//! Clients send `Authorization: Token <key>`. The key is random and shown to
//! the client once; only its SHA-256 hex digest is stored, so a database
//! leak does not expose usable credentials.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated token key.
pub const TOKEN_KEY_LENGTH: usize = 40;

/// Header schemes accepted in front of the key.
const SCHEMES: [&str; 2] = ["Token ", "Bearer "];

/// A freshly generated token.
pub struct GeneratedToken {
    /// Returned to the client, never persisted.
    pub key: String,
    /// SHA-256 hex digest stored in `auth_tokens.key_hash`.
    pub hash: String,
}

pub fn generate_token() -> GeneratedToken {
    let key: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_KEY_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_token(&key);
    GeneratedToken { key, hash }
}

/// SHA-256 hex digest of a token key.
pub fn hash_token(key: &str) -> String {
    format!("{:x}", Sha256::digest(key.as_bytes()))
}

/// Extract the key from an `Authorization` header value.
///
/// Accepts `Token <key>` and `Bearer <key>`; returns `None` for any other
/// scheme or an empty key.
pub fn parse_authorization(header: &str) -> Option<&str> {
    SCHEMES
        .iter()
        .find_map(|scheme| header.strip_prefix(scheme))
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_shape() {
        let token = generate_token();
        assert_eq!(token.key.len(), TOKEN_KEY_LENGTH);
        assert!(token.key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(token.hash, hash_token(&token.key));
        assert_eq!(token.hash.len(), 64);
    }

    #[test]
    fn keys_are_unique() {
        assert_ne!(generate_token().key, generate_token().key);
    }

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_token(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn parses_supported_schemes() {
        assert_eq!(parse_authorization("Token abc123"), Some("abc123"));
        assert_eq!(parse_authorization("Bearer abc123"), Some("abc123"));
        assert_eq!(parse_authorization("Basic abc123"), None);
        assert_eq!(parse_authorization("Token "), None);
        assert_eq!(parse_authorization("abc123"), None);
    }
}
