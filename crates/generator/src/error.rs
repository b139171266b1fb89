//! Generator error types

use docsynth_core::ValidationError;
use thiserror::Error;

/// Failure while obtaining a JSON object from the model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model configuration error: {0}")]
    Configuration(String),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Model API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model returned malformed JSON: {0}")]
    MalformedResponse(String),

    #[error("Model failed after {attempts} attempts: {last}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last: Box<ModelError>,
    },
}

impl ModelError {
    /// Whether another attempt could succeed. Configuration problems and
    /// client-side HTTP errors (bad request, auth, missing deployment) are
    /// fatal and never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::Transport(_)
            | ModelError::EmptyResponse
            | ModelError::MalformedResponse(_) => true,
            ModelError::Status { status, .. } => {
                matches!(*status, 408 | 409 | 429) || (500..600).contains(status)
            }
            ModelError::Configuration(_) | ModelError::ExhaustedRetries { .. } => false,
        }
    }
}

/// Failure while persisting a cache entry
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Terminal failure of a single-document generator
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to generate {document}: {source}")]
    Model {
        document: &'static str,
        #[source]
        source: ModelError,
    },

    #[error("Generated {document} failed schema validation: {source}")]
    Validation {
        document: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl GenerationError {
    pub fn document(&self) -> &'static str {
        match self {
            GenerationError::Model { document, .. } | GenerationError::Validation { document, .. } => {
                document
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsynth_core::FieldError;

    #[test]
    fn transient_failures_are_retryable() {
        assert!(ModelError::Transport("connection reset".into()).is_retryable());
        assert!(ModelError::EmptyResponse.is_retryable());
        assert!(ModelError::MalformedResponse("expected object".into()).is_retryable());
        for status in [408, 409, 429, 500, 502, 503] {
            let err = ModelError::Status {
                status,
                body: String::new(),
            };
            assert!(err.is_retryable(), "{status} should be retryable");
        }
    }

    #[test]
    fn configuration_and_client_errors_are_fatal() {
        assert!(!ModelError::Configuration("bad url".into()).is_retryable());
        for status in [400, 401, 403, 404] {
            let err = ModelError::Status {
                status,
                body: String::new(),
            };
            assert!(!err.is_retryable(), "{status} should be fatal");
        }
    }

    #[test]
    fn validation_error_message_embeds_field_errors() {
        let err = GenerationError::Validation {
            document: "insurance",
            source: ValidationError::new(vec![
                FieldError::new("primary.copay", "expected decimal string, found boolean"),
                FieldError::new("secondary", "required field is missing"),
            ]),
        };
        assert_eq!(
            err.to_string(),
            "Generated insurance failed schema validation: primary.copay: expected decimal string, found boolean; secondary: required field is missing"
        );
        assert_eq!(err.document(), "insurance");
    }
}
