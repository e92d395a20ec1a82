//! Tree builder
//!
//! Single pass, one line at a time. Nodes are created in an arena and linked
//! by index; a single frame stack tracks open constructs. Each frame carries
//! its construct kind and, for nodes, the arena index. [`TreeBuilder::finish`]
//! folds the arena into the owned [`Module`] tree.
//!
//! The builder never reports content problems. Lines that match nothing, or
//! that match in the wrong position, are skipped.

use crate::file_processor::{self, FileProcessorError};
use crate::logging::codes;
use crate::model::{Module, Node, NodeKind};
use crate::statements::{strip_line, MatchContext, Rejection, Statement};
use crate::{log_debug, log_success};
use std::path::Path;

/// An open construct on the scope stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Module,
    Import,
    Node { kind: NodeKind, index: usize },
}

impl Frame {
    fn construct(&self) -> &'static str {
        match self {
            Frame::Module => "module",
            Frame::Import => "import",
            Frame::Node { kind, .. } => kind.as_str(),
        }
    }
}

#[derive(Debug)]
struct Slot {
    node: Node,
    children: Vec<usize>,
}

/// Incremental module builder
#[derive(Debug, Default)]
pub struct TreeBuilder {
    module: Option<Module>,
    arena: Vec<Slot>,
    roots: Vec<usize>,
    frames: Vec<Frame>,
    line_number: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical lines fed so far
    pub fn lines_seen(&self) -> usize {
        self.line_number
    }

    /// Number of open constructs
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Positional state the next statement is checked against
    pub fn context(&self) -> MatchContext {
        MatchContext {
            module_open: self.module.is_some(),
            node_open: self.innermost_node().is_some(),
        }
    }

    /// Feed one raw physical line
    pub fn feed_line(&mut self, raw: &str) {
        self.line_number += 1;

        let Some(line) = strip_line(raw) else {
            return;
        };
        let Some(statement) = Statement::classify(line) else {
            return;
        };

        if let Err(rejection) = self.context().admit(&statement) {
            self.log_rejection(rejection, &statement);
            return;
        }

        log_debug!("Applying statement",
            "line" => self.line_number,
            "statement" => statement,
            "depth" => self.frames.len());

        self.apply(statement);
    }

    fn apply(&mut self, statement: Statement<'_>) {
        match statement {
            Statement::ModuleHeader { name } => {
                self.module = Some(Module::new(name));
                self.frames.push(Frame::Module);
            }
            Statement::Namespace { uri } => {
                if let Some(module) = self.module.as_mut() {
                    module.set_namespace(uri);
                }
            }
            Statement::Prefix { prefix } => {
                if let Some(module) = self.module.as_mut() {
                    module.set_prefix(prefix);
                }
            }
            Statement::Import { module: imported } => {
                if let Some(module) = self.module.as_mut() {
                    module.add_import(imported);
                }
                self.frames.push(Frame::Import);
            }
            Statement::NodeHeader { kind, name } => {
                let index = self.arena.len();
                self.arena.push(Slot {
                    node: Node::new(name, kind),
                    children: Vec::new(),
                });
                match self.innermost_node() {
                    Some(parent) => self.arena[parent].children.push(index),
                    None => self.roots.push(index),
                }
                self.frames.push(Frame::Node { kind, index });
            }
            Statement::Type { name } => {
                if let Some(node) = self.current_node_mut() {
                    node.set_data_type(name);
                }
            }
            Statement::Mandatory(value) => {
                if let Some(node) = self.current_node_mut() {
                    node.set_mandatory(value);
                }
            }
            Statement::Description { text } => {
                if let Some(node) = self.current_node_mut() {
                    node.set_description(text);
                }
            }
            Statement::CloseBrace => match self.frames.pop() {
                Some(frame) => {
                    log_debug!("Closed construct",
                        "line" => self.line_number,
                        "construct" => frame.construct());
                }
                None => {
                    log_debug!(
                        code = codes::builder::UNMATCHED_CLOSING_BRACE,
                        line = self.line_number,
                        "Closing brace with no open construct ignored"
                    );
                }
            },
        }
    }

    fn log_rejection(&self, rejection: Rejection, statement: &Statement<'_>) {
        let (code, message) = match rejection {
            Rejection::BeforeModule => (
                codes::builder::STATEMENT_BEFORE_MODULE,
                "Statement before module header ignored",
            ),
            Rejection::RepeatedModuleHeader => (
                codes::builder::REPEATED_MODULE_HEADER,
                "Additional module header ignored",
            ),
            Rejection::NoOpenNode => (
                codes::builder::ORPHAN_SUB_STATEMENT,
                "Sub-statement outside any node ignored",
            ),
        };
        log_debug!(
            code = code,
            line = self.line_number,
            &format!("{}: {}", message, statement)
        );
    }

    /// Arena index of the innermost open node, skipping module and import frames
    fn innermost_node(&self) -> Option<usize> {
        self.frames.iter().rev().find_map(|frame| match frame {
            Frame::Node { index, .. } => Some(*index),
            _ => None,
        })
    }

    fn current_node_mut(&mut self) -> Option<&mut Node> {
        let index = self.innermost_node()?;
        self.arena.get_mut(index).map(|slot| &mut slot.node)
    }

    /// Fold the arena into the owned tree. `None` if no module header was seen.
    pub fn finish(self) -> Option<Module> {
        let TreeBuilder {
            module,
            arena,
            roots,
            frames,
            line_number,
        } = self;
        let mut module = module?;

        // Children always have a larger index than their parent, so walking
        // backwards completes every subtree before its parent needs it.
        let mut built: Vec<Option<Node>> = Vec::with_capacity(arena.len());
        built.resize_with(arena.len(), || None);
        for (index, slot) in arena.into_iter().enumerate().rev() {
            let mut node = slot.node;
            for child in slot.children {
                if let Some(child_node) = built[child].take() {
                    node.add_child(child_node);
                }
            }
            built[index] = Some(node);
        }

        for root in roots {
            if let Some(node) = built[root].take() {
                module.add_node(node);
            }
        }

        log_success!(
            codes::success::TREE_BUILD_COMPLETE,
            "Module tree built",
            "module" => module.name(),
            "nodes" => module.node_count(),
            "imports" => module.imports().len(),
            "lines" => line_number,
            "unclosed_constructs" => frames.len()
        );

        Some(module)
    }
}

/// Build a module from in-memory text
pub fn build_module_from_source(source: &str) -> Option<Module> {
    let mut builder = TreeBuilder::new();
    for line in file_processor::split_lines(source) {
        builder.feed_line(line);
    }
    builder.finish()
}

/// Build a module from a file. Only file access failures are errors; a file
/// without a module header yields `Ok(None)`.
pub fn build_module(path: impl AsRef<Path>) -> Result<Option<Module>, FileProcessorError> {
    let source = file_processor::open_lines(path.as_ref())?;

    let mut builder = TreeBuilder::new();
    for line in source {
        builder.feed_line(&line?);
    }

    Ok(builder.finish())
}
