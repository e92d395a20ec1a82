//! File processor module with compile-time limits and global logging integration

mod lines;
mod processor;

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use std::path::Path;

pub use lines::{split_lines, SplitLines};
pub use processor::{FileMetadata, FileProcessor, FileProcessorError, SourceLines};

/// Open a file for streaming with no size or extension policy.
///
/// Policy belongs to the caller; use [`FileProcessor::check`] first when one
/// applies.
pub fn open_lines(file_path: &Path) -> Result<SourceLines, FileProcessorError> {
    FileProcessor::unrestricted().open(file_path)
}

/// Verify every file processor error code has registry metadata
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::logging::codes::{self, file_processing};

    let test_codes = [
        file_processing::FILE_NOT_FOUND,
        file_processing::INVALID_EXTENSION,
        file_processing::FILE_TOO_LARGE,
        file_processing::PERMISSION_DENIED,
        file_processing::INVALID_ENCODING,
        file_processing::IO_ERROR,
        file_processing::INVALID_PATH,
    ];

    for code in &test_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_open_lines_ignores_policy() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("module.txt");
        fs::write(&file_path, "module m {\r}\r").unwrap();

        let streamed: Vec<String> = open_lines(&file_path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(streamed, vec!["module m {", "}"]);
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
