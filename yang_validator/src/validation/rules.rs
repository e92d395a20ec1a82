//! Per-line lint rules
//!
//! Plain substring heuristics over one trimmed line. They are evaluated in
//! table order and every rule that applies contributes a finding.

use super::types::DiagnosticKind;

pub(super) struct LineRule {
    pub kind: DiagnosticKind,
    pub applies: fn(&str) -> bool,
}

fn unterminated(line: &str) -> bool {
    !line.ends_with(';') && !line.contains('{')
}

pub(super) const LINE_RULES: &[LineRule] = &[
    LineRule {
        kind: DiagnosticKind::MissingSemicolonNamespace,
        applies: |line| line.contains("namespace") && unterminated(line),
    },
    LineRule {
        kind: DiagnosticKind::MissingSemicolonPrefix,
        applies: |line| line.contains("prefix") && unterminated(line),
    },
    LineRule {
        kind: DiagnosticKind::MissingSemicolonDescription,
        applies: |line| line.contains("description") && line.contains('"') && unterminated(line),
    },
    LineRule {
        kind: DiagnosticKind::MissingSemicolonType,
        applies: |line| line.contains("type") && unterminated(line),
    },
    LineRule {
        kind: DiagnosticKind::DescriptionMissingQuotes,
        applies: |line| line.contains("description") && !line.contains('"'),
    },
    LineRule {
        kind: DiagnosticKind::DoubleSemicolon,
        applies: |line| line.contains(";;"),
    },
    // Best effort: flags text after a semicolon, e.g. `type string; // note`
    LineRule {
        kind: DiagnosticKind::MisplacedSemicolon,
        applies: |line| {
            line.contains(';') && !line.ends_with(';') && !line.ends_with(";;") && !line.contains('{')
        },
    },
];

/// Rules triggered by a trimmed line, in table order
pub(super) fn lint_line(line: &str) -> impl Iterator<Item = DiagnosticKind> + '_ {
    LINE_RULES
        .iter()
        .filter(move |rule| (rule.applies)(line))
        .map(|rule| rule.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<DiagnosticKind> {
        lint_line(line).collect()
    }

    #[test]
    fn well_formed_statements_are_clean() {
        for line in [
            r#"namespace "urn:x";"#,
            "prefix x;",
            "type string;",
            r#"description "d";"#,
            "container c {",
            "}",
        ] {
            assert!(kinds(line).is_empty(), "line: {}", line);
        }
    }

    #[test]
    fn missing_semicolons() {
        assert_eq!(
            kinds(r#"namespace "urn:x""#),
            vec![DiagnosticKind::MissingSemicolonNamespace]
        );
        assert_eq!(kinds("prefix x"), vec![DiagnosticKind::MissingSemicolonPrefix]);
        assert_eq!(kinds("type string"), vec![DiagnosticKind::MissingSemicolonType]);
        assert_eq!(
            kinds(r#"description "d""#),
            vec![DiagnosticKind::MissingSemicolonDescription]
        );
    }

    #[test]
    fn substring_matching_is_intentionally_loose() {
        // "typedef" contains "type"
        assert_eq!(kinds("typedef t"), vec![DiagnosticKind::MissingSemicolonType]);
        // a brace anywhere suppresses the semicolon checks
        assert!(kinds("leaf type {").is_empty());
    }

    #[test]
    fn warnings() {
        assert_eq!(
            kinds("description plain;"),
            vec![DiagnosticKind::DescriptionMissingQuotes]
        );
        assert_eq!(kinds("type string;;"), vec![DiagnosticKind::DoubleSemicolon]);
        assert_eq!(
            kinds("mandatory true; // required"),
            vec![DiagnosticKind::MisplacedSemicolon]
        );
    }

    #[test]
    fn one_line_can_trigger_several_rules() {
        assert_eq!(
            kinds("type string; description"),
            vec![
                DiagnosticKind::MissingSemicolonType,
                DiagnosticKind::DescriptionMissingQuotes,
                DiagnosticKind::MisplacedSemicolon,
            ]
        );
    }
}
