//! Field-level validation.
//!
//! [`FieldErrors`] collects `field -> [messages]` pairs the way the API
//! reports them. Rule modules stay free of I/O so handlers can run every
//! check before touching the database.

pub mod accounts;
pub mod publication;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Validation messages keyed by field name.
///
/// Serializes as a plain JSON object, e.g.
/// `{"publication_year": ["Publication year cannot be in the future. ..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding exactly one message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Append every message from `other`.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise [`CoreError::InvalidFields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = match &err.message {
                    Some(message) => message.to_string(),
                    None => fallback_message(err),
                };
                out.add(&field, message);
            }
        }
        out
    }
}

/// Message for derive rules declared without an explicit `message`.
fn fallback_message(err: &validator::ValidationError) -> String {
    match err.code.as_ref() {
        "email" => "Enter a valid email address.".to_string(),
        "required" => "This field is required.".to_string(),
        "length" => match (err.params.get("min"), err.params.get("max")) {
            (_, Some(max)) => format!("Ensure this field has no more than {max} characters."),
            (Some(min), None) => format!("Ensure this field has at least {min} characters."),
            (None, None) => "Invalid length.".to_string(),
        },
        code => format!("Invalid value ({code})."),
    }
}

/// Message for text fields that are empty once trimmed.
pub const BLANK_MESSAGE: &str = "This field may not be blank.";

/// `validator` rule rejecting text that is only whitespace.
pub fn check_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("blank").with_message(Cow::Borrowed(BLANK_MESSAGE)))
    } else {
        Ok(())
    }
}
