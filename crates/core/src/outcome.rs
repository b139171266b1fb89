use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A single violated constraint, located by field path (e.g. `address.state`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Result of validating raw model output against a document schema
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome<T> {
    Success(T),
    Failure(Vec<FieldError>),
}

impl<T> ValidationOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success(_))
    }

    pub fn into_result(self) -> Result<T, ValidationError> {
        match self {
            ValidationOutcome::Success(data) => Ok(data),
            ValidationOutcome::Failure(errors) => Err(ValidationError::new(errors)),
        }
    }
}

/// Join field errors into one descriptive message, in report order
pub fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
