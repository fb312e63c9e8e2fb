//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication. Book listing parameters live in
//! `shelfmark_core::listing` next to their parser.

use serde::Deserialize;
use shelfmark_core::error::CoreError;
use shelfmark_core::listing::{parse_number, search_terms, Page};
use shelfmark_core::types::DbId;
use shelfmark_core::validation::FieldErrors;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped page window.
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// `?search=&limit=&offset=` for searchable lists.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SearchParams {
    pub fn terms(&self) -> Vec<String> {
        self.search.as_deref().map(search_terms).unwrap_or_default()
    }

    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// `?post=&limit=&offset=` for the comment list.
///
/// `post` stays raw text so an empty or malformed value reaches the JSON
/// error contract instead of failing inside the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CommentListParams {
    pub post: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CommentListParams {
    /// The post filter; blank means unfiltered.
    pub fn post_id(&self) -> Result<Option<DbId>, CoreError> {
        let mut errors = FieldErrors::new();
        let post = parse_number("post", self.post.as_deref(), &mut errors);
        errors.into_result()?;
        Ok(post)
    }

    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn comment_params(post: Option<&str>) -> CommentListParams {
        CommentListParams {
            post: post.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn blank_post_filter_is_absent() {
        assert_eq!(comment_params(None).post_id().unwrap(), None);
        assert_eq!(comment_params(Some("")).post_id().unwrap(), None);
        assert_eq!(comment_params(Some(" 12 ")).post_id().unwrap(), Some(12));
    }

    #[test]
    fn non_numeric_post_filter_is_field_error() {
        assert_matches!(
            comment_params(Some("abc")).post_id(),
            Err(CoreError::InvalidFields(errors)) => {
                assert_eq!(errors.get("post").unwrap()[0], "Enter a number.");
            }
        );
    }
}
