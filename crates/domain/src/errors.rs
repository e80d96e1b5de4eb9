//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Validation failed (missing or malformed required field)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid recipient identifier
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

impl DomainError {
    /// Create a validation error for a missing required field
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::Validation(format!("{} is required", field.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message() {
        let err = DomainError::missing_field("message");
        assert_eq!(err.to_string(), "Validation failed: message is required");
    }

    #[test]
    fn invalid_recipient_message() {
        let err = DomainError::InvalidRecipient("abc".to_string());
        assert_eq!(err.to_string(), "Invalid recipient: abc");
    }
}
