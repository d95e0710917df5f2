//! Error handling module for the postgen hook
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the hook should use these types for consistency.
//!
//! The hook runs exactly once against freshly generated template output, so
//! the policy is simple: I/O failures are fatal and abort the run, advisory
//! conditions (like a missing secure random source) are logged and recovered
//! locally at the call site.

use thiserror::Error;

/// Main error type for the postgen hook
#[derive(Error, Debug)]
pub enum HookError {
    /// IO errors (reading, rewriting or removing generated files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Choices file errors (loading, parsing, unknown values)
    #[error("Choices error: {0}")]
    Choices(String),

    /// Secret generation errors (empty alphabet, bad parameters)
    #[error("Secret generation error: {0}")]
    Secret(String),

    /// Validation errors (CLI input, choice combinations)
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for hook operations
pub type Result<T> = std::result::Result<T, HookError>;

// Convenient error constructors
impl HookError {
    /// Create a choices error
    pub fn choices(msg: impl Into<String>) -> Self {
        Self::Choices(msg.into())
    }

    /// Create a secret generation error
    pub fn secret(msg: impl Into<String>) -> Self {
        Self::Secret(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HookError::choices("unknown toggle value");
        assert_eq!(err.to_string(), "Choices error: unknown toggle value");

        let err = HookError::secret("cannot sample from an empty alphabet");
        assert_eq!(
            err.to_string(),
            "Secret generation error: cannot sample from an empty alphabet"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HookError = io_err.into();
        assert!(matches!(err, HookError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        let err = HookError::validation("length must be positive");
        assert!(matches!(err, HookError::Validation(_)));

        let err = HookError::general("unexpected condition");
        assert!(matches!(err, HookError::General(_)));
    }
}
