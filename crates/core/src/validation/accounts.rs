//! Account field rules: usernames, passwords, profile text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::FieldErrors;

/// Maximum username length.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Maximum profile bio length.
pub const BIO_MAX_LENGTH: usize = 500;

/// Default minimum password length when not configured.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Letters, digits and `@ . + - _`.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username regex is valid"));

/// Check the username character set.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// `validator` adapter for [`is_valid_username`].
pub fn check_username(username: &str) -> Result<(), validator::ValidationError> {
    if is_valid_username(username) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("username").with_message(Cow::Borrowed(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        )))
    }
}

/// Check a registration password pair against the configured minimum length.
///
/// Both problems are reported under the `password` field.
pub fn validate_new_password(password: &str, confirm: &str, min_length: usize) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if password.chars().count() < min_length {
        errors.add(
            "password",
            format!("This password is too short. It must contain at least {min_length} characters."),
        );
    }
    if password != confirm {
        errors.add("password", "Password fields didn't match.");
    }
    errors
}
