//! Line-level statement recognition
//!
//! Recognition happens in two steps. [`Statement::classify`] is context free:
//! it maps one trimmed line to at most one statement by trying the patterns in
//! priority order. [`MatchContext::admit`] then applies the positional rules
//! (module header only before a module exists, sub-statements only while a
//! node is open). [`match_statement`] combines both.

mod patterns;

use crate::model::NodeKind;
use std::fmt;

/// One recognized line. Arguments borrow from the line they were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    ModuleHeader { name: &'a str },
    Namespace { uri: &'a str },
    Prefix { prefix: &'a str },
    Import { module: &'a str },
    NodeHeader { kind: NodeKind, name: &'a str },
    Type { name: &'a str },
    Mandatory(bool),
    Description { text: &'a str },
    CloseBrace,
}

impl<'a> Statement<'a> {
    /// Classify a trimmed, non-blank, non-comment line
    pub fn classify(line: &'a str) -> Option<Self> {
        use patterns::*;

        if let Some(name) = capture(&MODULE_HEADER, line) {
            return Some(Statement::ModuleHeader { name });
        }
        if let Some(uri) = capture(&NAMESPACE, line) {
            return Some(Statement::Namespace { uri });
        }
        if let Some(prefix) = capture(&PREFIX, line) {
            return Some(Statement::Prefix { prefix });
        }
        if let Some(module) = capture(&IMPORT, line) {
            return Some(Statement::Import { module });
        }
        for (kind, pattern) in NODE_HEADERS.iter() {
            if let Some(name) = capture(pattern, line) {
                return Some(Statement::NodeHeader { kind: *kind, name });
            }
        }
        if let Some(name) = capture(&TYPE, line) {
            return Some(Statement::Type { name });
        }
        if let Some(value) = capture(&MANDATORY, line) {
            return Some(Statement::Mandatory(value == "true"));
        }
        if let Some(text) = capture(&DESCRIPTION, line) {
            return Some(Statement::Description { text });
        }
        if line == "}" {
            return Some(Statement::CloseBrace);
        }

        None
    }

    /// Keyword that introduced the statement
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::ModuleHeader { .. } => "module",
            Statement::Namespace { .. } => "namespace",
            Statement::Prefix { .. } => "prefix",
            Statement::Import { .. } => "import",
            Statement::NodeHeader { kind, .. } => kind.as_str(),
            Statement::Type { .. } => "type",
            Statement::Mandatory(_) => "mandatory",
            Statement::Description { .. } => "description",
            Statement::CloseBrace => "}",
        }
    }

    /// Whether the statement edits the innermost open node
    pub fn is_sub_statement(&self) -> bool {
        matches!(
            self,
            Statement::Type { .. } | Statement::Mandatory(_) | Statement::Description { .. }
        )
    }

    /// Whether the statement opens a new construct
    pub fn opens_construct(&self) -> bool {
        matches!(
            self,
            Statement::ModuleHeader { .. } | Statement::Import { .. } | Statement::NodeHeader { .. }
        )
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::ModuleHeader { name } => write!(f, "module {}", name),
            Statement::Namespace { uri } => write!(f, "namespace \"{}\"", uri),
            Statement::Prefix { prefix } => write!(f, "prefix {}", prefix),
            Statement::Import { module } => write!(f, "import {}", module),
            Statement::NodeHeader { kind, name } => write!(f, "{} {}", kind, name),
            Statement::Type { name } => write!(f, "type {}", name),
            Statement::Mandatory(value) => write!(f, "mandatory {}", value),
            Statement::Description { text } => write!(f, "description \"{}\"", text),
            Statement::CloseBrace => write!(f, "}}"),
        }
    }
}

/// Builder state a statement is checked against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchContext {
    /// A module header has already been accepted
    pub module_open: bool,
    /// At least one node construct is open
    pub node_open: bool,
}

/// Why a classified statement was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Any statement before the first module header
    BeforeModule,
    /// A module header once a module exists
    RepeatedModuleHeader,
    /// type/mandatory/description with no open node
    NoOpenNode,
}

impl MatchContext {
    pub fn admit(&self, statement: &Statement<'_>) -> Result<(), Rejection> {
        match statement {
            Statement::ModuleHeader { .. } if self.module_open => {
                Err(Rejection::RepeatedModuleHeader)
            }
            Statement::ModuleHeader { .. } => Ok(()),
            _ if !self.module_open => Err(Rejection::BeforeModule),
            s if s.is_sub_statement() && !self.node_open => Err(Rejection::NoOpenNode),
            _ => Ok(()),
        }
    }
}

/// Recognize a trimmed line under the given builder state
pub fn match_statement<'a>(line: &'a str, ctx: &MatchContext) -> Option<Statement<'a>> {
    Statement::classify(line).filter(|statement| ctx.admit(statement).is_ok())
}

/// Trim a raw line; `None` for blank lines and `//` comment lines
pub fn strip_line(raw: &str) -> Option<&str> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with("//") {
        None
    } else {
        Some(line)
    }
}

/// Whether a trimmed line opens a module
pub fn is_module_header(line: &str) -> bool {
    patterns::MODULE_HEADER.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: MatchContext = MatchContext {
        module_open: true,
        node_open: true,
    };

    #[test]
    fn classify_recognizes_every_keyword() {
        let cases = [
            ("module m {", Statement::ModuleHeader { name: "m" }),
            (r#"namespace "urn:x";"#, Statement::Namespace { uri: "urn:x" }),
            ("prefix x;", Statement::Prefix { prefix: "x" }),
            ("import ietf-yang-types {", Statement::Import { module: "ietf-yang-types" }),
            (
                "container c {",
                Statement::NodeHeader { kind: NodeKind::Container, name: "c" },
            ),
            ("leaf l {", Statement::NodeHeader { kind: NodeKind::Leaf, name: "l" }),
            (
                "leaf-list ll {",
                Statement::NodeHeader { kind: NodeKind::LeafList, name: "ll" },
            ),
            ("list entries {", Statement::NodeHeader { kind: NodeKind::List, name: "entries" }),
            ("type string;", Statement::Type { name: "string" }),
            ("mandatory false;", Statement::Mandatory(false)),
            (r#"description "d";"#, Statement::Description { text: "d" }),
            ("}", Statement::CloseBrace),
        ];

        for (line, expected) in cases {
            assert_eq!(Statement::classify(line), Some(expected), "line: {}", line);
        }
    }

    #[test]
    fn classify_ignores_unknown_and_malformed_lines() {
        for line in [
            "grouping g {",
            "mandatory yes;",
            "type string",
            "description unquoted;",
            "};",
            "} // end",
            "leaf l;",
        ] {
            assert_eq!(Statement::classify(line), None, "line: {}", line);
        }
    }

    #[test]
    fn trailing_text_is_tolerated() {
        assert_eq!(
            Statement::classify("leaf l { // comment"),
            Some(Statement::NodeHeader { kind: NodeKind::Leaf, name: "l" })
        );
        assert_eq!(
            Statement::classify("type int32; extra"),
            Some(Statement::Type { name: "int32" })
        );
    }

    #[test]
    fn everything_waits_for_module_header() {
        let before = MatchContext::default();
        assert_eq!(match_statement("prefix x;", &before), None);
        assert_eq!(match_statement("}", &before), None);
        assert_eq!(
            match_statement("module m {", &before),
            Some(Statement::ModuleHeader { name: "m" })
        );
        assert_eq!(
            before.admit(&Statement::CloseBrace),
            Err(Rejection::BeforeModule)
        );
    }

    #[test]
    fn second_module_header_is_rejected() {
        assert_eq!(match_statement("module other {", &OPEN), None);
        assert_eq!(
            OPEN.admit(&Statement::ModuleHeader { name: "other" }),
            Err(Rejection::RepeatedModuleHeader)
        );
    }

    #[test]
    fn sub_statements_need_an_open_node() {
        let module_only = MatchContext {
            module_open: true,
            node_open: false,
        };

        assert_eq!(match_statement("type string;", &module_only), None);
        assert_eq!(match_statement("mandatory true;", &module_only), None);
        assert_eq!(
            module_only.admit(&Statement::Description { text: "d" }),
            Err(Rejection::NoOpenNode)
        );
        assert_eq!(
            match_statement("type string;", &OPEN),
            Some(Statement::Type { name: "string" })
        );
        // namespace and prefix are accepted at any depth
        assert_eq!(
            match_statement("prefix x;", &OPEN),
            Some(Statement::Prefix { prefix: "x" })
        );
    }

    #[test]
    fn strip_line_drops_blank_and_comment_lines() {
        assert_eq!(strip_line("   "), None);
        assert_eq!(strip_line(""), None);
        assert_eq!(strip_line("  // note"), None);
        assert_eq!(strip_line("\tleaf l {  "), Some("leaf l {"));
    }

    #[test]
    fn keyword_and_display() {
        let statement = Statement::NodeHeader {
            kind: NodeKind::LeafList,
            name: "tags",
        };
        assert_eq!(statement.keyword(), "leaf-list");
        assert_eq!(statement.to_string(), "leaf-list tags");
        assert!(statement.opens_construct());
        assert!(Statement::Mandatory(true).is_sub_statement());
        assert!(is_module_header("module m {"));
        assert!(!is_module_header("submodule m {"));
    }
}
