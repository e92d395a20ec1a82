mod error;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use result::{PipelineMode, PipelineResult};
pub use validation::validate_pipeline;

use crate::file_processor::FileProcessor;
use crate::logging;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Validate then build one file, writing the validation report to `out`
pub fn process_file<W: Write + ?Sized>(
    file_path: &Path,
    out: &mut W,
) -> Result<PipelineResult, PipelineError> {
    process_file_with_mode(file_path, PipelineMode::Full, out)
}

/// Run the halves selected by `mode` under the default file policy
pub fn process_file_with_mode<W: Write + ?Sized>(
    file_path: &Path,
    mode: PipelineMode,
    out: &mut W,
) -> Result<PipelineResult, PipelineError> {
    process_file_with_policy(file_path, mode, &FileProcessor::new(), out)
}

/// Run the halves selected by `mode`.
///
/// `policy` decides which files are accepted at all (size limit, extension)
/// and is checked before either half runs. Validation failures stop the
/// pipeline before building. A build that finds no module header is a
/// pipeline error, since there is nothing to return.
pub fn process_file_with_policy<W: Write + ?Sized>(
    file_path: &Path,
    mode: PipelineMode,
    policy: &FileProcessor,
    out: &mut W,
) -> Result<PipelineResult, PipelineError> {
    process_indexed_file(file_path, 0, mode, policy, out)
}

/// As [`process_file_with_policy`], tagging log events with a batch file id
pub(crate) fn process_indexed_file<W: Write + ?Sized>(
    file_path: &Path,
    file_id: usize,
    mode: PipelineMode,
    policy: &FileProcessor,
    out: &mut W,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(file_path.to_path_buf(), file_id, || -> Result<_, PipelineError> {
        crate::log_info!("Starting YANG file processing pipeline",
            "file" => file_path.display(),
            "mode" => mode.as_str());

        policy.check(file_path)?;

        let report = if mode.validates() {
            Some(crate::validation::validate_syntax(file_path, out)?)
        } else {
            None
        };

        let module = if mode.builds() {
            let module = crate::builder::build_module(file_path)?.ok_or_else(|| {
                PipelineError::Pipeline {
                    message: format!("No module declaration found in {}", file_path.display()),
                }
            })?;
            Some(module)
        } else {
            None
        };

        let result = PipelineResult::new(file_path, mode, report, module, start_time.elapsed());
        result.log_success();

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileProcessorError;
    use crate::validation::ValidationError;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    const EXAMPLE: &str = "module m {\n  namespace \"urn:x\";\n  prefix x;\n  container c {\n    leaf l {\n      type string;\n      mandatory true;\n      description \"d\";\n    }\n  }\n}\n";

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn full_pipeline_validates_and_builds() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.yang");
        fs::write(&file, EXAMPLE).unwrap();

        let mut out = Vec::new();
        let result = process_file(&file, &mut out).unwrap();

        assert!(result.report.as_ref().unwrap().is_valid());
        let module = result.module.unwrap();
        assert_eq!(module.namespace(), Some("urn:x"));
        assert_eq!(module.node_count(), 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "✓ Basic syntax validation passed\n✓ YANG file syntax is valid\n"
        );
    }

    #[test]
    fn validation_failure_stops_before_build() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.yang");
        fs::write(&file, "module m {\n  prefix x\n}\n").unwrap();

        let mut out = Vec::new();
        let err = process_file(&file, &mut out).unwrap_err();
        assert_matches!(
            err,
            PipelineError::Validation(ValidationError::Failed { error_count: 1 })
        );
        assert!(String::from_utf8(out).unwrap().starts_with("Errors found:\n"));
    }

    #[test]
    fn build_only_skips_validation() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.yang");
        // Would fail validation on the missing semicolon
        fs::write(&file, "module m {\n  prefix x\n  leaf l {\n  }\n}\n").unwrap();

        let mut out = Vec::new();
        let result = process_file_with_mode(&file, PipelineMode::BuildOnly, &mut out).unwrap();
        assert!(result.report.is_none());
        assert!(result.module.unwrap().find_node("l").is_some());
        assert!(out.is_empty());
    }

    #[test]
    fn build_only_without_module_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("empty.yang");
        fs::write(&file, "leaf l {\n}\n").unwrap();

        let err = process_file_with_mode(&file, PipelineMode::BuildOnly, &mut Vec::new())
            .unwrap_err();
        assert_matches!(err, PipelineError::Pipeline { .. });
    }

    #[test]
    fn validate_only_skips_build() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.yang");
        fs::write(&file, EXAMPLE).unwrap();

        let result =
            process_file_with_mode(&file, PipelineMode::ValidateOnly, &mut Vec::new()).unwrap();
        assert!(result.module.is_none());
        assert!(result.report.is_some());
    }

    #[test]
    fn file_policy_is_applied_before_either_half() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.txt");
        fs::write(&file, EXAMPLE).unwrap();

        let strict = FileProcessor::new().with_yang_extension_required(true);
        let mut out = Vec::new();
        let err = process_file_with_policy(&file, PipelineMode::Full, &strict, &mut out)
            .unwrap_err();
        assert_matches!(
            err,
            PipelineError::FileProcessing(FileProcessorError::InvalidExtension { .. })
        );
        assert!(out.is_empty());

        // The default policy accepts any extension
        let result = process_file_with_mode(&file, PipelineMode::BuildOnly, &mut out).unwrap();
        assert!(result.module.is_some());
    }

    #[test]
    fn oversized_file_is_rejected_by_default_policy() {
        use crate::config::compile_time::file_processing::MAX_FILE_SIZE;

        let dir = tempdir().unwrap();
        let file = dir.path().join("large.yang");
        fs::File::create(&file).unwrap().set_len(MAX_FILE_SIZE + 1).unwrap();

        let err = process_file(&file, &mut Vec::new()).unwrap_err();
        assert_matches!(
            err,
            PipelineError::FileProcessing(FileProcessorError::FileTooLarge { .. })
        );
    }

    #[test]
    fn missing_file_is_a_file_processing_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("missing.yang");

        let err = process_file(&file, &mut Vec::new()).unwrap_err();
        assert_matches!(
            err,
            PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. })
        );
    }
}
