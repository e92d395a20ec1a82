//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Tree builder notices. The builder never fails on content; these only tag
/// debug events for lines it skipped.
pub mod builder {
    use super::Code;

    pub const STATEMENT_BEFORE_MODULE: Code = Code::new("N101");
    pub const ORPHAN_SUB_STATEMENT: Code = Code::new("N102");
    pub const UNMATCHED_CLOSING_BRACE: Code = Code::new("N103");
    pub const REPEATED_MODULE_HEADER: Code = Code::new("N104");
}

/// Syntax validation codes
pub mod validation {
    use super::Code;

    pub const MISSING_SEMICOLON_NAMESPACE: Code = Code::new("E301");
    pub const MISSING_SEMICOLON_PREFIX: Code = Code::new("E302");
    pub const MISSING_SEMICOLON_DESCRIPTION: Code = Code::new("E303");
    pub const MISSING_SEMICOLON_TYPE: Code = Code::new("E304");
    pub const MISSING_MODULE_DECLARATION: Code = Code::new("E310");
    pub const UNBALANCED_BRACES: Code = Code::new("E311");
    pub const UNCLOSED_QUOTES: Code = Code::new("E312");
    pub const VALIDATION_FAILED: Code = Code::new("E320");

    pub const DESCRIPTION_MISSING_QUOTES: Code = Code::new("W301");
    pub const DOUBLE_SEMICOLON: Code = Code::new("W302");
    pub const MISPLACED_SEMICOLON: Code = Code::new("W303");
}

/// Batch discovery error codes
pub mod batch {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("E401");
    pub const NO_FILES_FOUND: Code = Code::new("E402");
    pub const DISCOVERY_IO_ERROR: Code = Code::new("E403");
    pub const WORKER_FAILURE: Code = Code::new("E404");
    pub const FILE_FAILED: Code = Code::new("E405");
    pub const PIPELINE_ERROR: Code = Code::new("E406");

    pub const FILE_LIMIT_REACHED: Code = Code::new("W401");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TREE_BUILD_COMPLETE: Code = Code::new("I040");
    pub const SYNTAX_VALIDATION_PASSED: Code = Code::new("I041");
    pub const PIPELINE_COMPLETE: Code = Code::new("I050");
    pub const FILE_DISCOVERY_COMPLETE: Code = Code::new("I060");
    pub const BATCH_PROCESSING_COMPLETE: Code = Code::new("I061");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    // System errors
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        "Critical internal system error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        "System initialization failure",
        "Check logging configuration and environment variables",
    ),
    // File processing errors
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::Medium,
        "File not found at specified path",
        "Check file path and ensure file exists",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Low,
        "File does not have .yang extension",
        "Rename file with .yang extension or relax the extension preference",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::Medium,
        "File exceeds maximum size limit",
        "Split the module or rebuild with a larger max_file_size",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::Medium,
        "Permission denied accessing file",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::Medium,
        "File is not valid UTF-8",
        "Re-encode the file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        "I/O error while reading file",
        "Check disk and file system health",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        "Path is empty or not a regular file",
        "Pass the path of a regular file",
    ),
    // Builder notices
    ErrorMetadata::new(
        "N101",
        "Builder",
        Severity::Low,
        "Statement appears before the module header and was skipped",
        "Move the statement inside the module block",
    ),
    ErrorMetadata::new(
        "N102",
        "Builder",
        Severity::Low,
        "Sub-statement outside any node was skipped",
        "Place type, mandatory and description inside a node block",
    ),
    ErrorMetadata::new(
        "N103",
        "Builder",
        Severity::Low,
        "Closing brace with no open construct was skipped",
        "Remove the extra closing brace",
    ),
    ErrorMetadata::new(
        "N104",
        "Builder",
        Severity::Low,
        "Second module header was skipped",
        "Keep a single module per file",
    ),
    // Validation errors
    ErrorMetadata::new(
        "E301",
        "Validation",
        Severity::Medium,
        "Namespace statement is not terminated by a semicolon",
        "Add ';' at the end of the namespace statement",
    ),
    ErrorMetadata::new(
        "E302",
        "Validation",
        Severity::Medium,
        "Prefix statement is not terminated by a semicolon",
        "Add ';' at the end of the prefix statement",
    ),
    ErrorMetadata::new(
        "E303",
        "Validation",
        Severity::Medium,
        "Description statement is not terminated by a semicolon",
        "Add ';' after the closing quote",
    ),
    ErrorMetadata::new(
        "E304",
        "Validation",
        Severity::Medium,
        "Type statement is not terminated by a semicolon",
        "Add ';' at the end of the type statement",
    ),
    ErrorMetadata::new(
        "E310",
        "Validation",
        Severity::High,
        "No module header found",
        "Start the file with 'module <name> {'",
    ),
    ErrorMetadata::new(
        "E311",
        "Validation",
        Severity::High,
        "Opening and closing braces do not balance",
        "Check that every '{' has a matching '}'",
    ),
    ErrorMetadata::new(
        "E312",
        "Validation",
        Severity::High,
        "A double-quoted string is never closed",
        "Add the missing '\"'",
    ),
    ErrorMetadata::new(
        "E320",
        "Validation",
        Severity::High,
        "Validation finished with one or more errors",
        "Fix the reported errors and validate again",
    ),
    // Validation warnings
    ErrorMetadata::new(
        "W301",
        "Validation",
        Severity::Low,
        "Description text might be missing quotes",
        "Wrap the description text in double quotes",
    ),
    ErrorMetadata::new(
        "W302",
        "Validation",
        Severity::Low,
        "Two consecutive semicolons",
        "Remove the extra ';'",
    ),
    ErrorMetadata::new(
        "W303",
        "Validation",
        Severity::Low,
        "Semicolon appears before the end of the line",
        "Keep one statement per line",
    ),
    // Batch errors
    ErrorMetadata::new(
        "E401",
        "Batch",
        Severity::Medium,
        "Directory not found",
        "Check the directory path",
    ),
    ErrorMetadata::new(
        "E402",
        "Batch",
        Severity::Low,
        "No .yang files found in directory",
        "Check the directory contents or the recursion setting",
    ),
    ErrorMetadata::new(
        "E403",
        "Batch",
        Severity::Medium,
        "I/O error during directory traversal",
        "Check directory permissions",
    ),
    ErrorMetadata::new(
        "E404",
        "Batch",
        Severity::High,
        "A worker thread panicked",
        "Re-run with --sequential to isolate the file",
    ),
    ErrorMetadata::new(
        "E405",
        "Batch",
        Severity::Medium,
        "A file in the batch failed validation or could not be read",
        "Run the file on its own for the full report",
    ),
    ErrorMetadata::new(
        "E406",
        "Batch",
        Severity::Medium,
        "The pipeline could not produce a result for the file",
        "Check that the file declares a module",
    ),
    ErrorMetadata::new(
        "W401",
        "Batch",
        Severity::Low,
        "Discovery stopped at the file limit",
        "Raise --max-files or narrow the directory",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity for a code (unknown codes are treated as High)
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::High)
}

/// Get description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.category)
        .unwrap_or("Unknown")
}
