//! Diagnostic and report types for syntax validation

use crate::logging::{codes, Code};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Diagnostic severity. Warnings never affect the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

impl DiagnosticLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One tag per validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingSemicolonNamespace,
    MissingSemicolonPrefix,
    MissingSemicolonDescription,
    MissingSemicolonType,
    DescriptionMissingQuotes,
    DoubleSemicolon,
    MisplacedSemicolon,
    MissingModule,
    UnbalancedBraces,
    UnclosedQuotes,
}

impl DiagnosticKind {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Self::DescriptionMissingQuotes | Self::DoubleSemicolon | Self::MisplacedSemicolon => {
                DiagnosticLevel::Warning
            }
            _ => DiagnosticLevel::Error,
        }
    }

    pub fn code(&self) -> Code {
        match self {
            Self::MissingSemicolonNamespace => codes::validation::MISSING_SEMICOLON_NAMESPACE,
            Self::MissingSemicolonPrefix => codes::validation::MISSING_SEMICOLON_PREFIX,
            Self::MissingSemicolonDescription => codes::validation::MISSING_SEMICOLON_DESCRIPTION,
            Self::MissingSemicolonType => codes::validation::MISSING_SEMICOLON_TYPE,
            Self::DescriptionMissingQuotes => codes::validation::DESCRIPTION_MISSING_QUOTES,
            Self::DoubleSemicolon => codes::validation::DOUBLE_SEMICOLON,
            Self::MisplacedSemicolon => codes::validation::MISPLACED_SEMICOLON,
            Self::MissingModule => codes::validation::MISSING_MODULE_DECLARATION,
            Self::UnbalancedBraces => codes::validation::UNBALANCED_BRACES,
            Self::UnclosedQuotes => codes::validation::UNCLOSED_QUOTES,
        }
    }

    /// Message text for the per-line rules
    pub(super) fn line_message(&self) -> &'static str {
        match self {
            Self::MissingSemicolonNamespace => "Missing semicolon after namespace declaration",
            Self::MissingSemicolonPrefix => "Missing semicolon after prefix declaration",
            Self::MissingSemicolonDescription => "Missing semicolon after description",
            Self::MissingSemicolonType => "Missing semicolon after type declaration",
            Self::DescriptionMissingQuotes => "Description might be missing quotes",
            Self::DoubleSemicolon => "Double semicolon detected",
            Self::MisplacedSemicolon => "Semicolon might be misplaced",
            Self::MissingModule => "No module declaration found in the file",
            Self::UnbalancedBraces => "Unbalanced braces in YANG file",
            Self::UnclosedQuotes => "Unclosed quotes in the file",
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// 1-based physical line; `None` for end-of-file checks
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// Finding tied to a physical line
    pub fn at_line(kind: DiagnosticKind, line: usize) -> Self {
        Self {
            level: kind.level(),
            line: Some(line),
            kind,
            message: format!("Line {}: {}", line, kind.line_message()),
        }
    }

    /// Whole-file finding
    pub fn file_level(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level: kind.level(),
            line: None,
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Code {
        self.kind.code()
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Collected findings of one validation pass, in discovery order per list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
    pub lines_checked: usize,
}

impl ValidationReport {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Warning => self.warnings.push(diagnostic),
            DiagnosticLevel::Error => self.errors.push(diagnostic),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Diagnostics of a given kind, warnings first
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.warnings
            .iter()
            .chain(self.errors.iter())
            .filter(move |d| d.kind == kind)
    }

    /// Write the human-readable report: warnings, then errors or the success lines
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        if !self.warnings.is_empty() {
            writeln!(out, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(out, "  ⚠ {}", warning)?;
            }
        }

        if !self.errors.is_empty() {
            writeln!(out, "Errors found:")?;
            for error in &self.errors {
                writeln!(out, "  ✗ {}", error)?;
            }
            return Ok(());
        }

        writeln!(out, "✓ Basic syntax validation passed")?;
        writeln!(out, "✓ YANG file syntax is valid")
    }
}
