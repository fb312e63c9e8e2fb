//! Post tag normalization.

use crate::error::CoreError;

/// Maximum length of a normalized tag name.
pub const MAX_TAG_LENGTH: usize = 50;

/// Normalize a single tag: trim, lowercase, join inner whitespace with `-`.
pub fn normalize_tag(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalize a tag list, dropping blanks and duplicates (first occurrence
/// wins).
pub fn normalize_tags<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, CoreError> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let tag = normalize_tag(name.as_ref());
        if tag.is_empty() || tags.contains(&tag) {
            continue;
        }
        if tag.chars().count() > MAX_TAG_LENGTH {
            return Err(CoreError::field(
                "tags",
                format!("Ensure each tag has no more than {MAX_TAG_LENGTH} characters."),
            ));
        }
        tags.push(tag);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_tag("  Rust  Web "), "rust-web");
        assert_eq!(normalize_tag("Django"), "django");
    }

    #[test]
    fn deduplicates_case_insensitively() {
        let tags = normalize_tags(&["Rust", "rust", " RUST ", "axum", ""]).unwrap();
        assert_eq!(tags, vec!["rust", "axum"]);
    }

    #[test]
    fn rejects_overlong_tags() {
        let long = "x".repeat(MAX_TAG_LENGTH + 1);
        assert!(normalize_tags(&[long]).is_err());
        let exact = "x".repeat(MAX_TAG_LENGTH);
        assert_eq!(normalize_tags(&[exact.clone()]).unwrap(), vec![exact]);
    }
}
