use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use yang_validator::config::RuntimeConfig;
use yang_validator::file_processor::FileProcessor;
use yang_validator::pipeline::{self, PipelineError, PipelineMode};
use yang_validator::{batch, logging, Module};

/// Parsed command line
#[derive(Debug)]
struct CliOptions {
    mode: PipelineMode,
    json: bool,
    batch: batch::BatchConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, String> {
    let runtime = RuntimeConfig::from_env();
    logging::config::init_runtime_preferences(runtime.logging)?;
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("yang-validator");
    if args.len() < 2 {
        eprintln!("Usage: {} <file.yang|directory> [options]", program);
        eprintln!("       {} --help", program);
        return Ok(ExitCode::FAILURE);
    }

    if args[1] == "--help" {
        print_help(program);
        return Ok(ExitCode::SUCCESS);
    }

    let input_path = Path::new(&args[1]);
    let mut options = parse_options(&args[2..])?;
    options.batch.file_policy = FileProcessor::from_preferences(&runtime.file_processor);

    if input_path.is_dir() {
        Ok(process_directory_batch(input_path, &options))
    } else {
        // Missing paths go through the file path so the error is reported uniformly
        Ok(process_single_file(input_path, &options))
    }
}

fn print_help(program_name: &str) {
    println!("YANG Validator v{}", env!("CARGO_PKG_VERSION"));
    println!("Line-based YANG syntax validation and module tree building");
    println!();
    println!("USAGE:");
    println!(
        "    {} <file.yang> [options]          # Process single file",
        program_name
    );
    println!(
        "    {} <directory> [options]          # Process directory",
        program_name
    );
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --validate-only     Run only the syntax validator");
    println!("    --build-only        Run only the tree builder");
    println!("    --json              Print the built tree as JSON");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on first failed file");
    println!("    --quiet             Suppress per-file progress and reports");
    println!();
    println!("EXIT STATUS:");
    println!("    0  every file passed");
    println!("    1  a validation error, missing module, or file access error");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} example.yang                    # Validate and print tree",
        program_name
    );
    println!(
        "    {} example.yang --build-only --json",
        program_name
    );
    println!(
        "    {} models/ --threads 4             # 4 threads max",
        program_name
    );
    println!(
        "    {} models/ --sequential --fail-fast",
        program_name
    );
    println!();

    let batch_info = batch::get_batch_info();
    println!("BATCH PROCESSING CAPABILITIES:");
    println!(
        "    Max recommended threads: {}",
        batch_info.max_recommended_threads
    );
    println!("    Thread ceiling: {}", batch_info.max_worker_threads);
    println!("    Files per batch: {}", batch_info.max_files_per_batch);
    println!(
        "    Supported extensions: {}",
        batch_info.supported_file_extensions.join(", ")
    );
    println!();
    println!("CONFIGURATION:");
    println!("    {}", yang_validator::config::build_info::source_info());
    for line in logging::config::get_config_summary().lines() {
        println!("    {}", line);
    }
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        mode: PipelineMode::Full,
        json: false,
        batch: batch::BatchConfig::default(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--validate-only" => options.mode = select_mode(options.mode, PipelineMode::ValidateOnly)?,
            "--build-only" => options.mode = select_mode(options.mode, PipelineMode::BuildOnly)?,
            "--json" => options.json = true,
            "--sequential" => options.batch.max_threads = 1,
            "--threads" => {
                if let Some(value) = args.get(i + 1) {
                    match value.parse::<usize>() {
                        Ok(threads) => options.batch.max_threads = threads.max(1),
                        Err(_) => eprintln!("Warning: Invalid thread count '{}', using default", value),
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --threads requires a number");
                }
            }
            "--no-recursive" => options.batch.recursive = false,
            "--max-files" => {
                if let Some(value) = args.get(i + 1) {
                    match value.parse::<usize>() {
                        Ok(max_files) => options.batch.max_files = Some(max_files),
                        Err(_) => eprintln!("Warning: Invalid max files '{}', ignoring", value),
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --max-files requires a number");
                }
            }
            "--fail-fast" => options.batch.fail_fast = true,
            "--quiet" => options.batch.progress_reporting = false,
            other => eprintln!("Warning: Unknown option '{}'", other),
        }
        i += 1;
    }

    options.batch.mode = options.mode;
    Ok(options)
}

/// `--validate-only` and `--build-only` exclude each other
fn select_mode(current: PipelineMode, requested: PipelineMode) -> Result<PipelineMode, String> {
    if current != PipelineMode::Full && current != requested {
        return Err("--validate-only and --build-only cannot be combined".to_string());
    }
    Ok(requested)
}

fn process_single_file(file_path: &Path, options: &CliOptions) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match pipeline::process_file_with_policy(
        file_path,
        options.mode,
        &options.batch.file_policy,
        &mut out,
    ) {
        Ok(result) => {
            if let Some(module) = &result.module {
                if let Err(err) = print_module(&mut out, module, options.json) {
                    eprintln!("Failed to write module tree: {}", err);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            // The validator has already written its own failure lines to stdout
            if !matches!(error, PipelineError::Validation(_)) {
                eprintln!("FAILED: {}", error);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_module<W: Write>(out: &mut W, module: &Module, json: bool) -> io::Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(module)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        writeln!(out, "{}", rendered)
    } else {
        write!(out, "{}", module.render_tree())
    }
}

fn process_directory_batch(dir_path: &Path, options: &CliOptions) -> ExitCode {
    let config = &options.batch;
    println!("Starting batch processing: {}", dir_path.display());
    println!(
        "Configuration: {} threads, recursive={}, fail_fast={}, mode={}",
        config.effective_threads(),
        config.recursive,
        config.fail_fast,
        config.mode.as_str()
    );

    if let Some(max_files) = config.max_files {
        println!("File limit: {} files maximum", max_files);
    }

    match batch::process_directory_with_config(dir_path, config) {
        Ok(results) => {
            println!();
            print_batch_results(&results);

            if results.failure_count() > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            eprintln!("Batch processing failed: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn print_batch_results(results: &batch::BatchResults) {
    println!("Batch Processing Summary:");
    println!("  Files discovered: {}", results.files_discovered);
    println!("  Files processed: {}", results.files_processed);
    println!(
        "  Successful: {} ({:.1}%)",
        results.success_count(),
        results.success_rate() * 100.0
    );
    println!("  Failed: {}", results.failure_count());
    println!(
        "  Total time: {:.2}s",
        results.processing_duration.as_secs_f64()
    );

    let warnings: usize = results
        .successful_files
        .iter()
        .map(|(_, result)| result.warning_count())
        .sum();
    if warnings > 0 {
        println!("  Warnings in passing files: {}", warnings);
    }

    if results.failure_count() > 0 {
        println!("\nFailed Files:");
        for (file_path, error) in &results.failed_files {
            println!("  {}: {} ({})", file_path.display(), error.stage(), error);
        }
    }

    if results.success_count() > 0 && results.success_count() <= 10 {
        println!("\nSuccessful Files:");
        for (file_path, result) in &results.successful_files {
            println!("  {}: {}", file_path.display(), describe_success(result));
        }
    } else if results.success_count() > 10 {
        println!(
            "\n{} files processed successfully (showing first 5):",
            results.success_count()
        );
        for (file_path, result) in results.successful_files.iter().take(5) {
            println!("  {}: {}", file_path.display(), describe_success(result));
        }
        println!("  ... and {} more", results.success_count() - 5);
    }
}

fn describe_success(result: &pipeline::PipelineResult) -> String {
    match &result.module {
        Some(module) => format!(
            "module {}, {} nodes, {} warnings",
            module.name(),
            module.node_count(),
            result.warning_count()
        ),
        None => format!("{} warnings", result.warning_count()),
    }
}
