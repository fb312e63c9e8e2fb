//! Publication-year range rule for books.

use std::borrow::Cow;

use chrono::Datelike;

/// Earliest accepted publication year (movable-type printing).
pub const MIN_PUBLICATION_YEAR: i32 = 1450;

/// The current UTC calendar year.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Accept `year` iff `MIN_PUBLICATION_YEAR <= year <= current_year`.
///
/// Returns the year unchanged on success so callers can chain it.
pub fn validate_publication_year(year: i32, current_year: i32) -> Result<i32, String> {
    if year > current_year {
        return Err(format!(
            "Publication year cannot be in the future. Current year is {current_year}."
        ));
    }
    if year < MIN_PUBLICATION_YEAR {
        return Err("Publication year seems unrealistic. Please enter a valid year.".to_string());
    }
    Ok(year)
}

/// `validator` adapter, checked against the current year.
pub fn check_publication_year(year: i32) -> Result<(), validator::ValidationError> {
    validate_publication_year(year, current_year())
        .map(|_| ())
        .map_err(|message| {
            validator::ValidationError::new("publication_year").with_message(Cow::Owned(message))
        })
}
