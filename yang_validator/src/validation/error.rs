//! Error types for syntax validation

use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The file could not be opened or read; carried unchanged
    #[error(transparent)]
    FileAccess(#[from] FileProcessorError),

    /// One or more validation errors were found
    #[error("Validation failed with {error_count} error(s)")]
    Failed { error_count: usize },

    /// The report could not be written
    #[error("Failed to write validation output: {message}")]
    Output { message: String },
}

impl ValidationError {
    pub(super) fn output(err: std::io::Error) -> Self {
        Self::Output {
            message: err.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileAccess(inner) => inner.error_code(),
            Self::Failed { .. } => codes::validation::VALIDATION_FAILED,
            Self::Output { .. } => codes::file_processing::IO_ERROR,
        }
    }

    /// Whether the failure came from the file rather than its content
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_counts_errors() {
        let err = ValidationError::Failed { error_count: 3 };
        assert_eq!(err.to_string(), "Validation failed with 3 error(s)");
        assert_eq!(err.error_code().as_str(), "E320");
    }

    #[test]
    fn file_access_is_transparent() {
        let inner = FileProcessorError::FileNotFound {
            path: "a.yang".to_string(),
        };
        let err = ValidationError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.error_code().as_str(), "E005");
        assert!(err.is_file_access());
    }
}
