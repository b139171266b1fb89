use thiserror::Error;

use crate::outcome::{FieldError, format_errors};

/// Schema violation carrying every field error in report order
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", format_errors(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}
