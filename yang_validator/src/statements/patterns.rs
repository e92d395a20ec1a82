//! Statement pattern definitions
//!
//! Every pattern is anchored at the line start and matches a prefix of the
//! line, so trailing text after the `{` or `;` is tolerated. Patterns are
//! compiled once per process on first use.

use crate::model::NodeKind;
use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    // Patterns are constants; failure here is a programming error
    Regex::new(pattern).unwrap()
}

pub(super) static MODULE_HEADER: Lazy<Regex> =
    Lazy::new(|| compile(r"^\s*module\s+(\S+)\s*\{"));

pub(super) static NAMESPACE: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*namespace\s+"([^"]+)"\s*;"#));

pub(super) static PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"^\s*prefix\s+(\S+)\s*;"));

pub(super) static IMPORT: Lazy<Regex> = Lazy::new(|| compile(r"^\s*import\s+(\S+)\s*\{"));

static CONTAINER: Lazy<Regex> = Lazy::new(|| compile(r"^\s*container\s+(\S+)\s*\{"));

// `leaf` needs whitespace after the keyword, so `leaf-list` never lands here
static LEAF: Lazy<Regex> = Lazy::new(|| compile(r"^\s*leaf\s+(\S+)\s*\{"));

static LEAF_LIST: Lazy<Regex> = Lazy::new(|| compile(r"^\s*leaf-list\s+(\S+)\s*\{"));

static LIST: Lazy<Regex> = Lazy::new(|| compile(r"^\s*list\s+(\S+)\s*\{"));

pub(super) static TYPE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*type\s+(\S+)\s*;"));

pub(super) static MANDATORY: Lazy<Regex> =
    Lazy::new(|| compile(r"^\s*mandatory\s+(true|false)\s*;"));

pub(super) static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*description\s+"([^"]+)"\s*;"#));

/// Node header patterns in priority order
pub(super) static NODE_HEADERS: [(NodeKind, &Lazy<Regex>); 4] = [
    (NodeKind::Container, &CONTAINER),
    (NodeKind::Leaf, &LEAF),
    (NodeKind::LeafList, &LEAF_LIST),
    (NodeKind::List, &LIST),
];

/// First capture group of `pattern` against `line`, if the pattern matches
pub(super) fn capture<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_pattern_rejects_leaf_list() {
        assert!(capture(&LEAF, "leaf-list names {").is_none());
        assert_eq!(capture(&LEAF_LIST, "leaf-list names {"), Some("names"));
    }

    #[test]
    fn name_capture_stops_before_brace() {
        assert_eq!(capture(&CONTAINER, "container c{"), Some("c"));
        assert_eq!(capture(&TYPE, "type string;"), Some("string"));
    }

    #[test]
    fn patterns_match_prefix_only() {
        assert_eq!(capture(&PREFIX, "prefix x; // trailing"), Some("x"));
        assert!(capture(&PREFIX, "my-prefix x;").is_none());
    }

    #[test]
    fn quoted_captures_require_non_empty_text() {
        assert!(capture(&NAMESPACE, r#"namespace "";"#).is_none());
        assert_eq!(capture(&DESCRIPTION, r#"description "a b";"#), Some("a b"));
    }
}
