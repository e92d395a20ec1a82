use crate::builder;
use crate::validation::SyntaxValidator;

const SELF_CHECK_SOURCE: &str = "module self-check {\n  prefix sc;\n  leaf sample {\n    type string;\n  }\n}\n";

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;

    // Exercises every compiled statement pattern the sample uses
    let module = builder::build_module_from_source(SELF_CHECK_SOURCE)
        .ok_or_else(|| "Tree builder did not recognize the self-check module".to_string())?;
    if module.find_node("sample").and_then(|node| node.data_type()) != Some("string") {
        return Err("Tree builder produced an unexpected self-check tree".to_string());
    }

    let report = SyntaxValidator::check_source(SELF_CHECK_SOURCE);
    if !report.is_valid() || report.warning_count() > 0 {
        return Err(format!(
            "Syntax validator flagged the self-check module: {} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        ));
    }

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "file_processing" => true,
        "tree_builder" => true,
        "syntax_validation" => true
    );

    Ok(())
}
