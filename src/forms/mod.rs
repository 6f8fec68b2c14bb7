//! Form definitions backing the console routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod books;
pub mod borrows;
pub mod posts;
pub mod settings;
pub mod topics;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid form payload: {0}")]
    Payload(String),
}

/// Trims a free-text field, mapping blank input to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parses an optional non-negative counter; blank input maps to `None`.
pub(crate) fn optional_count(value: Option<String>) -> Result<Option<i64>, FormError> {
    let Some(text) = optional_text(value) else {
        return Ok(None);
    };
    match text.parse::<i64>() {
        Ok(count) if count >= 0 => Ok(Some(count)),
        _ => Err(TypeConstraintError::InvalidValue(text).into()),
    }
}
