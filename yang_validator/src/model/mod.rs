//! Module model produced by the tree builder
//!
//! Plain owned data: a [`Module`] owns its top-level [`Node`]s and every node
//! owns its children. Order of insertion is preserved everywhere. All types
//! serialize with serde so callers can emit the tree as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Container,
    Leaf,
    LeafList,
    List,
}

impl NodeKind {
    /// Parse node kind from its keyword (exact match, case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "container" => Some(Self::Container),
            "leaf" => Some(Self::Leaf),
            "leaf-list" => Some(Self::LeafList),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
            Self::List => "list",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structural declaration inside a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    kind: NodeKind,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mandatory: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            data_type: None,
            mandatory: None,
            description: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    /// `None` until a `mandatory` statement is seen
    pub fn mandatory(&self) -> Option<bool> {
        self.mandatory
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn set_data_type(&mut self, data_type: impl Into<String>) {
        self.data_type = Some(data_type.into());
    }

    pub fn set_mandatory(&mut self, mandatory: bool) {
        self.mandatory = Some(mandatory);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// First direct child with the given name
    pub fn find_child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    /// This node plus all descendants
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }

    fn render_into(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{}{} {}", "  ".repeat(depth), self.kind, self.name)?;
        if let Some(data_type) = &self.data_type {
            write!(f, " {}", data_type)?;
        }
        if let Some(mandatory) = self.mandatory {
            write!(f, " mandatory={}", mandatory)?;
        }
        if let Some(description) = &self.description {
            write!(f, " \"{}\"", description)?;
        }
        writeln!(f)?;

        for child in &self.children {
            child.render_into(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Root of a parsed schema file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    nodes: Vec<Node>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            prefix: None,
            imports: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Top-level nodes in declaration order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Last write wins
    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = Some(namespace.into());
    }

    /// Last write wins
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = Some(prefix.into());
    }

    pub fn add_import(&mut self, module_name: impl Into<String>) {
        self.imports.push(module_name.into());
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Total number of nodes at every depth
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(Node::subtree_size).sum()
    }

    /// Top-level node by name
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Indented text rendering, one line per node
    pub fn render_tree(&self) -> TreeView<'_> {
        TreeView(self)
    }
}

/// [`fmt::Display`] adapter returned by [`Module::render_tree`]
#[derive(Debug, Clone, Copy)]
pub struct TreeView<'a>(&'a Module);

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let module = self.0;
        write!(f, "module {}", module.name)?;
        match (&module.namespace, &module.prefix) {
            (Some(ns), Some(prefix)) => write!(f, " (namespace {}, prefix {})", ns, prefix)?,
            (Some(ns), None) => write!(f, " (namespace {})", ns)?,
            (None, Some(prefix)) => write!(f, " (prefix {})", prefix)?,
            (None, None) => {}
        }
        writeln!(f)?;

        for import in &module.imports {
            writeln!(f, "  import {}", import)?;
        }
        for node in &module.nodes {
            node.render_into(f, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_module() -> Module {
        let mut leaf = Node::new("l", NodeKind::Leaf);
        leaf.set_data_type("string");
        leaf.set_mandatory(true);
        leaf.set_description("d");

        let mut container = Node::new("c", NodeKind::Container);
        container.add_child(leaf);

        let mut module = Module::new("m");
        module.set_namespace("urn:x");
        module.set_prefix("x");
        module.add_import("ietf-inet-types");
        module.add_node(container);
        module.add_node(Node::new("names", NodeKind::LeafList));
        module
    }

    #[test]
    fn node_kind_keywords_roundtrip() {
        for kind in [
            NodeKind::Container,
            NodeKind::Leaf,
            NodeKind::LeafList,
            NodeKind::List,
        ] {
            assert_eq!(NodeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::parse("Leaf"), None);
        assert_eq!(NodeKind::parse("grouping"), None);
    }

    #[test]
    fn last_namespace_write_wins() {
        let mut module = Module::new("m");
        module.set_namespace("urn:a");
        module.set_namespace("urn:b");
        assert_eq!(module.namespace(), Some("urn:b"));
        assert_eq!(module.prefix(), None);
    }

    #[test]
    fn lookup_and_counts() {
        let module = sample_module();

        assert_eq!(module.node_count(), 3);
        let container = module.find_node("c").unwrap();
        let leaf = container.find_child("l").unwrap();
        assert_eq!(leaf.kind(), NodeKind::Leaf);
        assert_eq!(leaf.mandatory(), Some(true));
        assert!(module.find_node("l").is_none());
        assert_eq!(module.find_node("names").unwrap().mandatory(), None);
    }

    #[test]
    fn render_tree_indents_children() {
        let rendered = sample_module().render_tree().to_string();
        let expected = "module m (namespace urn:x, prefix x)\n\
                        \x20 import ietf-inet-types\n\
                        \x20 container c\n\
                        \x20   leaf l string mandatory=true \"d\"\n\
                        \x20 leaf-list names\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn json_uses_keyword_spelling() {
        let module = sample_module();
        let json = serde_json::to_value(&module).unwrap();

        assert_eq!(json["name"], "m");
        assert_eq!(json["nodes"][0]["kind"], "container");
        assert_eq!(json["nodes"][0]["children"][0]["type"], "string");
        assert_eq!(json["nodes"][1]["kind"], "leaf-list");
        assert!(json["nodes"][1].get("mandatory").is_none());

        let back: Module = serde_json::from_value(json).unwrap();
        assert_eq!(back, module);
    }
}
