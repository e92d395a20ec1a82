use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::validation::ValidationError;

/// Pipeline processing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Syntax validation failed: {0}")]
    Validation(ValidationError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(err) => err.error_code(),
            Self::Validation(err) => err.error_code(),
            Self::Pipeline { .. } => codes::batch::PIPELINE_ERROR,
        }
    }

    /// Short stage label for summaries
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileProcessing(_) => "File processing error",
            Self::Validation(_) => "Syntax validation error",
            Self::Pipeline { .. } => "Pipeline error",
        }
    }
}

/// File access failures surface as `FileProcessing` whichever stage hit them
impl From<ValidationError> for PipelineError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileAccess(inner) => Self::FileProcessing(inner),
            other => Self::Validation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn file_access_is_unwrapped() {
        let inner = FileProcessorError::FileNotFound {
            path: "x.yang".to_string(),
        };
        let err = PipelineError::from(ValidationError::FileAccess(inner.clone()));
        assert_eq!(err, PipelineError::FileProcessing(inner));
        assert_eq!(err.error_code().as_str(), "E005");
    }

    #[test]
    fn validation_failure_keeps_its_count() {
        let err = PipelineError::from(ValidationError::Failed { error_count: 2 });
        assert_matches!(
            err,
            PipelineError::Validation(ValidationError::Failed { error_count: 2 })
        );
        assert_eq!(
            err.to_string(),
            "Syntax validation failed: Validation failed with 2 error(s)"
        );
        assert_eq!(err.stage(), "Syntax validation error");
    }

    #[test]
    fn pipeline_error_creation() {
        let err = PipelineError::pipeline_error("Test error");
        assert_matches!(&err, PipelineError::Pipeline { message } if message == "Test error");
        assert_eq!(err.error_code().as_str(), "E406");
    }
}
