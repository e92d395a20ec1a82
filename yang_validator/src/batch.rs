//! Batch processing of YANG files
//!
//! Discovers `.yang` files under a directory and runs the pipeline over each,
//! either sequentially or on a bounded set of worker threads. Each file's
//! validation report is buffered and printed whole, so reports from parallel
//! workers never interleave.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::file_processor::FileProcessor;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineMode, PipelineResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    pub mode: PipelineMode,
    /// Size and extension policy checked for every discovered file
    pub file_policy: FileProcessor,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(1),
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
            mode: PipelineMode::Full,
            file_policy: FileProcessor::new(),
        }
    }
}

impl BatchConfig {
    /// Worker count clamped to the compile-time ceiling
    pub fn effective_threads(&self) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS)
    }

    /// Discovery cap: the requested limit, never above the compile-time one
    pub fn file_limit(&self) -> usize {
        self.max_files
            .map_or(MAX_FILES_PER_BATCH, |max| max.min(MAX_FILES_PER_BATCH))
    }
}

/// Batch processing results
#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.successful_files.len() as f64 / self.files_processed as f64
        }
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: PipelineResult) {
        self.successful_files.push((file_path, result));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    /// Order both lists by path so parallel runs report deterministically
    fn sort_by_path(&mut self) {
        self.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed, {} successful ({:.1}%), {} failed, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No YANG files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Worker thread error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            Self::DirectoryNotFound { .. } => codes::batch::DIRECTORY_NOT_FOUND,
            Self::NoFilesFound { .. } => codes::batch::NO_FILES_FOUND,
            Self::IoError { .. } => codes::batch::DISCOVERY_IO_ERROR,
            Self::ThreadError { .. } => codes::batch::WORKER_FAILURE,
        }
    }

    fn io(err: io::Error, dir_path: &Path) -> Self {
        Self::IoError {
            error: format!("{}: {}", dir_path.display(), err),
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Discover YANG files in a directory, sorted by path
pub fn discover_yang_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        let err = BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        };
        crate::log_error!(err.error_code(), "File discovery failed",
            "directory" => dir_path.display());
        return Err(err);
    }

    let limit = config.file_limit();
    let mut files = Vec::new();
    visit_directory(dir_path, config.recursive, limit, &mut files)?;

    if files.len() >= limit {
        crate::log_warning!(codes::batch::FILE_LIMIT_REACHED, "Reached maximum file limit",
            "files_found" => files.len(),
            "limit" => limit
        );
    }

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    files.sort();

    crate::log_success!(
        codes::success::FILE_DISCOVERY_COMPLETE,
        "File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

/// Entries are visited in name order so a file limit always keeps the same files
fn visit_directory(
    dir_path: &Path,
    recursive: bool,
    limit: usize,
    files: &mut Vec<PathBuf>,
) -> Result<(), BatchError> {
    let mut entries = fs::read_dir(dir_path)
        .map_err(|e| BatchError::io(e, dir_path))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BatchError::io(e, dir_path))?;
    entries.sort();

    for path in entries {
        if files.len() >= limit {
            break;
        }

        if path.is_dir() {
            if recursive {
                visit_directory(&path, recursive, limit, files)?;
            }
        } else if is_yang_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a path represents a YANG file
fn is_yang_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yang"))
            .unwrap_or(false)
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Run one file, returning its buffered validation report alongside the outcome
fn run_file(
    file_path: &Path,
    file_id: usize,
    config: &BatchConfig,
) -> (Result<PipelineResult, PipelineError>, Vec<u8>) {
    let mut output = Vec::new();
    let outcome = pipeline::process_indexed_file(
        file_path,
        file_id,
        config.mode,
        &config.file_policy,
        &mut output,
    );

    if let Err(err) = &outcome {
        crate::log_error!(codes::batch::FILE_FAILED, "File processing failed",
            "file" => file_path.display(),
            "file_id" => file_id,
            "error_code" => err.error_code(),
            "reason" => err);
    }

    (outcome, output)
}

/// Print a file's progress line and report as one block
fn report_progress(position: usize, total: usize, file_path: &Path, output: &[u8]) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "Processing file {} of {}: {}",
        position,
        total,
        file_path.display()
    );
    let _ = stdout.write_all(output);
}

/// Process a directory of YANG files sequentially
pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch processing",
        "directory" => dir_path.display()
    );

    let files = discover_yang_files(dir_path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        let (outcome, output) = run_file(file_path, file_id, config);

        if config.progress_reporting {
            report_progress(file_id + 1, files.len(), file_path, &output);
        }

        match outcome {
            Ok(result) => results.add_success(file_path.clone(), result),
            Err(err) => {
                results.add_failure(file_path.clone(), err);
                if config.fail_fast {
                    crate::log_info!("Fail-fast mode enabled, stopping batch processing");
                    break;
                }
            }
        }
    }

    results.processing_duration = start_time.elapsed();

    crate::log_performance!(
        codes::success::BATCH_PROCESSING_COMPLETE,
        "Sequential batch processing completed",
        duration = results.processing_duration,
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count()
    );

    Ok(results)
}

/// Process files on scoped worker threads pulling from a shared index.
///
/// With fail-fast, workers stop taking new files once any file fails; files
/// already in flight still complete and are recorded.
pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.effective_threads();

    crate::log_info!("Starting parallel batch processing",
        "directory" => dir_path.display(),
        "max_threads" => threads
    );

    let files = discover_yang_files(dir_path, config)?;

    let mut initial = BatchResults::new();
    initial.files_discovered = files.len();
    let results = Mutex::new(initial);
    let next_file = AtomicUsize::new(0);
    let completed = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);

    crate::log_debug!("Parallel processing configuration",
        "total_files" => files.len(),
        "threads" => threads
    );

    let joined: Vec<thread::Result<()>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads.min(files.len()))
            .map(|_| {
                scope.spawn(|| loop {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    let file_id = next_file.fetch_add(1, Ordering::Relaxed);
                    let Some(file_path) = files.get(file_id) else {
                        break;
                    };

                    let (outcome, output) = run_file(file_path, file_id, config);
                    let position = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if config.progress_reporting {
                        report_progress(position, files.len(), file_path, &output);
                    }

                    let mut guard = results.lock().unwrap_or_else(PoisonError::into_inner);
                    match outcome {
                        Ok(result) => guard.add_success(file_path.clone(), result),
                        Err(err) => {
                            guard.add_failure(file_path.clone(), err);
                            if config.fail_fast {
                                stop.store(true, Ordering::Relaxed);
                            }
                        }
                    }
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join()).collect()
    });

    if joined.iter().any(Result::is_err) {
        let err = BatchError::ThreadError {
            message: "Thread panicked during processing".to_string(),
        };
        crate::log_error!(err.error_code(), "Parallel batch processing aborted",
            "directory" => dir_path.display());
        return Err(err);
    }

    if stop.load(Ordering::Relaxed) {
        crate::log_info!("Fail-fast mode enabled, stopped batch processing");
    }

    let mut results = results.into_inner().unwrap_or_else(PoisonError::into_inner);
    results.sort_by_path();
    results.processing_duration = start_time.elapsed();

    crate::log_performance!(
        codes::success::BATCH_PROCESSING_COMPLETE,
        "Parallel batch processing completed",
        duration = results.processing_duration,
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "threads_used" => threads
    );

    Ok(results)
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Process a directory with default configuration
pub fn process_directory(dir_path: &Path) -> Result<BatchResults, BatchError> {
    process_directory_with_config(dir_path, &BatchConfig::default())
}

/// Process a directory with custom configuration
pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.effective_threads() == 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    }
}

/// Get batch processing capabilities
pub fn get_batch_info() -> BatchInfo {
    BatchInfo {
        max_recommended_threads: thread::available_parallelism()
            .map(|n| n.get().min(MAX_WORKER_THREADS))
            .unwrap_or(1),
        max_worker_threads: MAX_WORKER_THREADS,
        max_files_per_batch: MAX_FILES_PER_BATCH,
        supported_file_extensions: vec!["yang".to_string()],
    }
}

/// Batch processing capabilities
#[derive(Debug, Clone)]
pub struct BatchInfo {
    pub max_recommended_threads: usize,
    pub max_worker_threads: usize,
    pub max_files_per_batch: usize,
    pub supported_file_extensions: Vec<String>,
}

impl BatchInfo {
    pub fn summary(&self) -> String {
        format!(
            "Batch processor: {} threads recommended (max {}), up to {} files per batch, extensions: {}",
            self.max_recommended_threads,
            self.max_worker_threads,
            self.max_files_per_batch,
            self.supported_file_extensions.join(", ")
        )
    }
}
