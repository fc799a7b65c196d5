/// Core error types for Helpernote
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Helpernote
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input outside the domain of a calculation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A form field failed validation
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a validation error for a form field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field, if this is a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::InvalidInput(_) => None,
        }
    }
}
