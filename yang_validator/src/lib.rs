//! Line-based YANG subset tooling: a tree builder that turns recognized
//! statements into a [`Module`] and an independent heuristic syntax validator.

// Internal modules
#[macro_use]
pub mod logging;
pub mod batch;
pub mod builder;
pub mod config;
pub mod file_processor;
pub mod model;
pub mod pipeline;
pub mod statements;
pub mod validation;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use builder::{build_module, build_module_from_source, TreeBuilder};
pub use file_processor::FileProcessorError;
pub use model::{Module, Node, NodeKind};
pub use pipeline::{PipelineError, PipelineMode, PipelineResult};
pub use statements::{match_statement, MatchContext, Statement};
pub use validation::{validate_syntax, Diagnostic, ValidationError, ValidationReport};
