//! List-endpoint query handling: exact filters, term search, ordering and
//! pagination.
//!
//! Everything here is pure; the repository layer turns a parsed query into
//! SQL. Sort fields are whitelisted enums, so their column names can be
//! interpolated into `ORDER BY` safely while filter and search values are
//! always bound as parameters.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Maximum page size for any list endpoint.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Optional `LIMIT`/`OFFSET` window. No limit means "return everything".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl Page {
    /// Clamp raw values: limit to `1..=MAX_LIST_LIMIT`, offset to `>= 0`.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.map(|l| l.clamp(1, MAX_LIST_LIMIT)),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Split a search string into terms on whitespace and commas.
///
/// Every returned term must match at least one searchable column for a row
/// to be included.
pub fn search_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build an `ILIKE` pattern matching `term` anywhere, with `\`, `%` and `_`
/// escaped so they match literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A whitelisted, sortable column.
pub trait SortField: Copy {
    /// Map a public field name to the field, `None` if not orderable.
    fn from_name(name: &str) -> Option<Self>;
    /// Fully qualified SQL column.
    fn column(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> OrderBy<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Parse an `ordering` parameter such as `"-publication_year,title"`.
///
/// Unknown field names are skipped. When nothing usable remains the
/// `default` ordering is returned.
pub fn parse_ordering<F: SortField>(raw: Option<&str>, default: &[OrderBy<F>]) -> Vec<OrderBy<F>> {
    let parsed: Vec<OrderBy<F>> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter_map(|item| {
            let (name, direction) = match item.strip_prefix('-') {
                Some(rest) => (rest, SortDirection::Desc),
                None => (item, SortDirection::Asc),
            };
            F::from_name(name).map(|field| OrderBy { field, direction })
        })
        .collect();

    if parsed.is_empty() {
        default.to_vec()
    } else {
        parsed
    }
}

/// Render an `ORDER BY` body, appending `tie_breaker ASC` for stable pages.
pub fn order_by_sql<F: SortField>(ordering: &[OrderBy<F>], tie_breaker: &str) -> String {
    let mut parts: Vec<String> = ordering
        .iter()
        .map(|o| format!("{} {}", o.field.column(), o.direction.as_sql()))
        .collect();
    parts.push(format!("{tie_breaker} ASC"));
    parts.join(", ")
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

/// Orderable book columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSortField {
    Title,
    PublicationYear,
}

impl SortField for BookSortField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(BookSortField::Title),
            "publication_year" => Some(BookSortField::PublicationYear),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            BookSortField::Title => "b.title",
            BookSortField::PublicationYear => "b.publication_year",
        }
    }
}

/// Default book ordering: title ascending.
pub const DEFAULT_BOOK_ORDERING: &[OrderBy<BookSortField>] = &[OrderBy {
    field: BookSortField::Title,
    direction: SortDirection::Asc,
}];

/// Raw `GET /books` query string. Everything arrives as text so malformed
/// numbers can be reported as field errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookListParams {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A validated book listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author_id: Option<DbId>,
    pub publication_year: Option<i32>,
    pub search_terms: Vec<String>,
    pub ordering: Vec<OrderBy<BookSortField>>,
    pub page: Page,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            title: None,
            author_id: None,
            publication_year: None,
            search_terms: Vec::new(),
            ordering: DEFAULT_BOOK_ORDERING.to_vec(),
            page: Page::default(),
        }
    }
}

impl BookQuery {
    /// Validate raw parameters. Empty filter values are treated as absent.
    pub fn from_params(params: &BookListParams) -> Result<Self, CoreError> {
        let mut errors = FieldErrors::new();

        let author_id = parse_number::<DbId>("author", params.author.as_deref(), &mut errors);
        let publication_year =
            parse_number::<i32>("publication_year", params.publication_year.as_deref(), &mut errors);
        errors.into_result()?;

        Ok(Self {
            title: params.title.clone().filter(|t| !t.is_empty()),
            author_id,
            publication_year,
            search_terms: params.search.as_deref().map(search_terms).unwrap_or_default(),
            ordering: parse_ordering(params.ordering.as_deref(), DEFAULT_BOOK_ORDERING),
            page: Page::new(params.limit, params.offset),
        })
    }
}

/// Parse an optional numeric filter, recording "Enter a number." on failure.
///
/// A missing or blank value is no filter.
pub fn parse_number<T: std::str::FromStr>(
    field: &str,
    raw: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, "Enter a number.");
            None
        }
    }
}
