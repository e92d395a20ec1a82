use crate::model::Module;
use crate::validation::ValidationReport;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which halves of the pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    #[default]
    Full,
    ValidateOnly,
    BuildOnly,
}

impl PipelineMode {
    pub fn validates(&self) -> bool {
        !matches!(self, Self::BuildOnly)
    }

    pub fn builds(&self) -> bool {
        !matches!(self, Self::ValidateOnly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::ValidateOnly => "validate-only",
            Self::BuildOnly => "build-only",
        }
    }
}

/// Outcome of one file. Each half is `None` when the mode skipped it.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub path: PathBuf,
    pub mode: PipelineMode,
    pub report: Option<ValidationReport>,
    pub module: Option<Module>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        path: &Path,
        mode: PipelineMode,
        report: Option<ValidationReport>,
        module: Option<Module>,
        processing_duration: Duration,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            mode,
            report,
            module,
            processing_duration,
        }
    }

    pub fn warning_count(&self) -> usize {
        self.report.as_ref().map_or(0, ValidationReport::warning_count)
    }

    /// Node count across the whole tree, zero when nothing was built
    pub fn node_count(&self) -> usize {
        self.module.as_ref().map_or(0, Module::node_count)
    }

    pub fn log_success(&self) {
        crate::log_performance!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "YANG file processing pipeline succeeded",
            duration = self.processing_duration,
            "file" => self.path.display(),
            "mode" => self.mode.as_str(),
            "warnings" => self.warning_count(),
            "nodes" => self.node_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, NodeKind};

    #[test]
    fn mode_halves() {
        assert!(PipelineMode::Full.validates() && PipelineMode::Full.builds());
        assert!(!PipelineMode::ValidateOnly.builds());
        assert!(!PipelineMode::BuildOnly.validates());
        assert_eq!(PipelineMode::default(), PipelineMode::Full);
    }

    #[test]
    fn counts_default_to_zero_when_skipped() {
        let result = PipelineResult::new(
            Path::new("a.yang"),
            PipelineMode::ValidateOnly,
            Some(ValidationReport::default()),
            None,
            Duration::ZERO,
        );
        assert_eq!(result.node_count(), 0);
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn node_count_covers_nested_nodes() {
        let mut container = Node::new("c", NodeKind::Container);
        container.add_child(Node::new("l", NodeKind::Leaf));
        let mut module = Module::new("m");
        module.add_node(container);

        let result = PipelineResult::new(
            Path::new("m.yang"),
            PipelineMode::BuildOnly,
            None,
            Some(module),
            Duration::ZERO,
        );
        assert_eq!(result.node_count(), 2);
    }
}
