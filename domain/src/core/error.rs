//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid debate request: {0}")]
    InvalidRequest(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Transcript contains no usable responses")]
    EmptyTranscript,
}

impl DomainError {
    /// Check if this error indicates a malformed request
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, DomainError::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let error = DomainError::InvalidRequest("no models selected".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid debate request: no models selected"
        );
    }

    #[test]
    fn test_is_invalid_request_check() {
        assert!(DomainError::InvalidRequest("x".to_string()).is_invalid_request());
        assert!(!DomainError::EmptyTranscript.is_invalid_request());
    }
}
