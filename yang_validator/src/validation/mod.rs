//! Syntax validation
//!
//! Heuristic lint over raw lines: brace balance, quote balance, module
//! presence and statement termination. Independent of the tree builder.

pub mod error;
mod rules;
pub mod types;
pub mod validator;

pub use error::{ValidationError, ValidationResult};
pub use types::{Diagnostic, DiagnosticKind, DiagnosticLevel, ValidationReport};
pub use validator::SyntaxValidator;

use crate::file_processor::{self, FileProcessorError};
use crate::logging::codes;
use crate::{log_error, log_success};
use std::io::Write;
use std::path::Path;

/// Check a file without writing anything
pub fn check_file(path: &Path) -> Result<ValidationReport, FileProcessorError> {
    let source = file_processor::open_lines(path)?;

    let mut validator = SyntaxValidator::new();
    for line in source {
        validator.feed_line(&line?);
    }

    Ok(validator.finish())
}

/// Validate a file and write the report to `out`.
///
/// Succeeds with the report when no errors were found. Any error yields
/// [`ValidationError::Failed`] after the report has been written. File access
/// failures write a one-line notice and return the underlying error.
pub fn validate_syntax<W: Write + ?Sized>(
    path: impl AsRef<Path>,
    out: &mut W,
) -> ValidationResult<ValidationReport> {
    let path = path.as_ref();

    let report = match check_file(path) {
        Ok(report) => report,
        Err(err) => {
            writeln!(out, "✗ Validation failed: {}", err).map_err(ValidationError::output)?;
            return Err(ValidationError::FileAccess(err));
        }
    };

    report.write_to(out).map_err(ValidationError::output)?;

    if report.has_errors() {
        log_error!(codes::validation::VALIDATION_FAILED, "Syntax validation failed",
            "file" => path.display(),
            "errors" => report.error_count(),
            "warnings" => report.warning_count());
        return Err(ValidationError::Failed {
            error_count: report.error_count(),
        });
    }

    log_success!(codes::success::SYNTAX_VALIDATION_PASSED, "Syntax validation passed",
        "file" => path.display(),
        "lines" => report.lines_checked,
        "warnings" => report.warning_count());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn run(path: &Path) -> (ValidationResult<ValidationReport>, String) {
        let mut out = Vec::new();
        let result = validate_syntax(path, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn valid_file_prints_success_lines() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.yang");
        fs::write(&file, "module m {\n  prefix m;\n}\n").unwrap();

        let (result, output) = run(&file);
        assert!(result.unwrap().is_valid());
        assert_eq!(
            output,
            "✓ Basic syntax validation passed\n✓ YANG file syntax is valid\n"
        );
    }

    #[test]
    fn invalid_file_prints_report_and_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.yang");
        fs::write(&file, "module m {\n  prefix m\n  type string;;\n").unwrap();

        let (result, output) = run(&file);
        assert_matches!(result, Err(ValidationError::Failed { error_count: 2 }));
        assert_eq!(
            output,
            "Warnings:\n\
             \x20 ⚠ Line 3: Double semicolon detected\n\
             Errors found:\n\
             \x20 ✗ Line 2: Missing semicolon after prefix declaration\n\
             \x20 ✗ Unbalanced braces in YANG file - 1 more opening brace(s)\n"
        );
    }

    #[test]
    fn missing_file_writes_notice_and_propagates() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("missing.yang");

        let (result, output) = run(&file);
        assert_matches!(
            result,
            Err(ValidationError::FileAccess(FileProcessorError::FileNotFound { .. }))
        );
        assert!(output.starts_with("✗ Validation failed: File not found: "));
    }

    #[test]
    fn validation_is_idempotent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.yang");
        fs::write(&file, "module m {\ndescription plain;\n").unwrap();

        let (first, first_output) = run(&file);
        let (second, second_output) = run(&file);
        assert_eq!(first, second);
        assert_eq!(first_output, second_output);
    }

    #[test]
    fn warnings_alone_do_not_fail() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("m.yang");
        fs::write(&file, "module m {\ndescription plain;\n}\n").unwrap();

        let (result, output) = run(&file);
        let report = result.unwrap();
        assert_eq!(report.warning_count(), 1);
        assert!(output.starts_with("Warnings:\n  ⚠ Line 2: Description might be missing quotes\n"));
        assert!(output.ends_with("✓ YANG file syntax is valid\n"));
    }
}
