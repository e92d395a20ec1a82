//! File processor implementation with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs::{self, File};
use super::lines::LineReader;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .yang, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    fn from_io(err: &io::Error, path: &Path, action: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("Failed to {} '{}': {}", action, path.display(), err),
            },
        }
    }
}

/// File metadata collected before reading
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// File extension (if any), lowercased
    pub extension: Option<String>,
    /// Whether file has .yang extension
    pub is_yang_file: bool,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Check if file is large (uses compile-time threshold)
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Streaming line reader over an opened source file.
///
/// Yields each physical line without its terminator; `\n`, `\r\n` and a lone
/// `\r` all end a line. The underlying handle is dropped with the iterator,
/// so early returns release it too.
#[derive(Debug)]
pub struct SourceLines {
    lines: LineReader<BufReader<File>>,
    metadata: FileMetadata,
    started: Instant,
    lines_read: usize,
    performance_logging: bool,
    finished: bool,
}

impl SourceLines {
    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// Number of lines yielded so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    fn log_completion(&self) {
        if !self.performance_logging {
            return;
        }

        let duration_ms = format!("{:.2}", self.started.elapsed().as_secs_f64() * 1000.0);
        log_success!(
            codes::success::FILE_PROCESSING_SUCCESS,
            "File read successfully",
            "file" => self.metadata.path.display(),
            "size_bytes" => self.metadata.size,
            "size_human" => self.metadata.human_readable_size(),
            "lines" => self.lines_read,
            "duration_ms" => duration_ms
        );
    }
}

impl Iterator for SourceLines {
    type Item = Result<String, FileProcessorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lines.read_line().transpose() {
            Some(Ok(line)) => {
                self.lines_read += 1;
                Some(Ok(line))
            }
            Some(Err(e)) => {
                self.finished = true;
                let error = FileProcessorError::from_io(&e, &self.metadata.path, "read");
                log_error!(error.error_code(), "Failed to read line",
                    "file" => self.metadata.path.display(),
                    "after_line" => self.lines_read,
                    "io_error" => e);
                Some(Err(error))
            }
            None => {
                self.finished = true;
                self.log_completion();
                None
            }
        }
    }
}

/// File processor with compile-time limits and runtime preferences
#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Whether to require .yang extension (runtime preference)
    pub require_yang_extension: bool,
    /// Whether to reject files above the compile-time maximum size
    pub enforce_size_limit: bool,
    /// Whether to log read metrics once a file has been consumed (runtime preference)
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    /// Create new file processor with default preferences
    pub fn new() -> Self {
        Self {
            require_yang_extension: false,
            enforce_size_limit: true,
            enable_performance_logging: true,
        }
    }

    /// Processor that accepts any readable file, whatever its size or extension
    pub fn unrestricted() -> Self {
        Self {
            enforce_size_limit: false,
            ..Self::new()
        }
    }

    /// Create file processor from runtime preferences
    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_yang_extension: prefs.require_yang_extension,
            enforce_size_limit: true,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    /// Require .yang extension
    pub fn with_yang_extension_required(mut self, required: bool) -> Self {
        self.require_yang_extension = required;
        self
    }

    /// Check the path and this processor's size and extension policy
    /// without opening the file
    pub fn check(&self, file_path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let path = self.validate_path(file_path)?;
        let metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata)?;
        Ok(metadata)
    }

    /// Validate the path and open it for line-by-line reading
    pub fn open(&self, file_path: &Path) -> Result<SourceLines, FileProcessorError> {
        let started = Instant::now();

        log_debug!("Opening source file", "file" => file_path.display());

        let metadata = self.check(file_path)?;
        let path = &metadata.path;

        let file = File::open(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path, "open");
            log_error!(error.error_code(), "Failed to open file",
                "file" => path.display(),
                "io_error" => e);
            error
        })?;

        Ok(SourceLines {
            lines: LineReader::new(BufReader::new(file)),
            metadata,
            started,
            lines_read: 0,
            performance_logging: self.enable_performance_logging,
            finished: false,
        })
    }

    /// Validate file path and check existence
    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path.display());
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path.display());
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = FileProcessorError::IoError {
                message: format!("Failed to resolve path '{}': {}", file_path.display(), e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path.display(),
                "io_error" => e);
            error
        })
    }

    /// Get file metadata
    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path, "read metadata for");
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_yang_file = extension.as_deref() == Some("yang");

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            is_yang_file,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_large_file" => file_metadata.is_large_file());

        Ok(file_metadata)
    }

    /// Validate file properties using compile-time limits
    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if self.enforce_size_limit && metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => metadata.path.display(),
                "size_bytes" => metadata.size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        if self.require_yang_extension && !metadata.is_yang_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .yang extension",
                "file" => metadata.path.display(),
                "extension" => metadata.extension.as_deref().unwrap_or("none"));
            return Err(error);
        }

        Ok(())
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn read_all(processor: &FileProcessor, path: &Path) -> Result<Vec<String>, FileProcessorError> {
        processor.open(path)?.collect()
    }

    #[test]
    fn test_open_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.yang");
        fs::write(&file_path, "module m {\n\n  prefix m;\n}\n").unwrap();

        let source = FileProcessor::new().open(&file_path).unwrap();
        assert!(source.metadata().is_yang_file);

        let lines = read_all(&FileProcessor::new(), &file_path).unwrap();
        assert_eq!(lines, vec!["module m {", "", "  prefix m;", "}"]);
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.yang");
        fs::write(&file_path, "").unwrap();

        assert!(read_all(&FileProcessor::new(), &file_path).unwrap().is_empty());
    }

    #[test]
    fn test_streaming_counts_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("stream.yang");
        fs::write(&file_path, "a\r\nb\nc\rd").unwrap();

        let mut source = FileProcessor::new().open(&file_path).unwrap();
        let lines: Vec<String> = source.by_ref().map(|l| l.unwrap()).collect();

        assert_eq!(lines, vec!["a", "b", "c", "d"]);
        assert_eq!(source.lines_read(), 4);
        assert!(source.next().is_none());
    }

    #[test]
    fn test_file_not_found() {
        let result = FileProcessor::new().open(Path::new("nonexistent.yang"));
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().check(dir.path());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_invalid_utf8_maps_to_encoding_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.yang");
        fs::write(&file_path, [b'm', 0xff, 0xfe, b'\n']).unwrap();

        let result = read_all(&FileProcessor::new(), &file_path);
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_compile_time_file_size_limit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("large.yang");
        let file = fs::File::create(&file_path).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();

        let result = FileProcessor::new().check(&file_path);
        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge { size, max_size })
                if size > MAX_FILE_SIZE && max_size == MAX_FILE_SIZE
        );

        let metadata = FileProcessor::unrestricted().check(&file_path).unwrap();
        assert_eq!(metadata.size, MAX_FILE_SIZE + 1);
        assert!(metadata.is_large_file());
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");
        fs::write(&file_path, "module m {\n}\n").unwrap();

        assert!(FileProcessor::new().check(&file_path).is_ok());

        let strict = FileProcessor::new().with_yang_extension_required(true);
        assert_matches!(
            strict.check(&file_path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );
    }

    #[test]
    fn test_error_code() {
        let error = FileProcessorError::FileNotFound {
            path: "test.yang".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(codes::get_category(error.error_code().as_str()), "FileProcessing");
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_yang_extension: true,
            enable_performance_logging: false,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_yang_extension);
        assert!(processor.enforce_size_limit);
        assert!(!processor.enable_performance_logging);

        let open = FileProcessor::unrestricted();
        assert!(!open.require_yang_extension);
        assert!(!open.enforce_size_limit);
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.yang"),
            size: 2048,
            extension: Some("yang".to_string()),
            is_yang_file: true,
            modified: None,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
        assert!(!metadata.is_large_file());
    }
}
