//! Line-state machine behind syntax validation

use super::rules;
use super::types::{Diagnostic, DiagnosticKind, ValidationReport};
use crate::log_debug;
use crate::statements::{is_module_header, strip_line};

/// Single-pass syntax checker.
///
/// Feed raw physical lines in order, then call [`SyntaxValidator::finish`].
/// Blank and `//` comment lines advance the line counter but are otherwise
/// skipped.
#[derive(Debug, Default)]
pub struct SyntaxValidator {
    line_number: usize,
    brace_balance: i64,
    in_quotes: bool,
    module_seen: bool,
    report: ValidationReport,
}

impl SyntaxValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check in-memory text
    pub fn check_source(source: &str) -> ValidationReport {
        Self::check_lines(crate::file_processor::split_lines(source))
    }

    /// Check any sequence of raw lines
    pub fn check_lines<I, S>(lines: I) -> ValidationReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validator = Self::new();
        for line in lines {
            validator.feed_line(line.as_ref());
        }
        validator.finish()
    }

    /// Current `{` minus `}` count
    pub fn brace_balance(&self) -> i64 {
        self.brace_balance
    }

    pub fn in_quotes(&self) -> bool {
        self.in_quotes
    }

    pub fn feed_line(&mut self, raw: &str) {
        self.line_number += 1;

        let Some(line) = strip_line(raw) else {
            return;
        };

        // Quotes are scanned on the raw line, braces on the trimmed one
        self.toggle_quotes(raw);
        for c in line.chars() {
            match c {
                '{' => self.brace_balance += 1,
                '}' => self.brace_balance -= 1,
                _ => {}
            }
        }

        if is_module_header(line) {
            self.module_seen = true;
        }

        for kind in rules::lint_line(line) {
            self.record(Diagnostic::at_line(kind, self.line_number));
        }
    }

    /// Each `"` not immediately preceded by `\` flips the in-quotes state
    fn toggle_quotes(&mut self, raw: &str) {
        let mut previous = None;
        for c in raw.chars() {
            if c == '"' && previous != Some('\\') {
                self.in_quotes = !self.in_quotes;
            }
            previous = Some(c);
        }
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        log_debug!("Validation finding",
            "code" => diagnostic.code(),
            "level" => diagnostic.level,
            "message" => &diagnostic.message);
        self.report.push(diagnostic);
    }

    /// Run the end-of-file checks and return the report
    pub fn finish(mut self) -> ValidationReport {
        if !self.module_seen {
            self.record(Diagnostic::file_level(
                DiagnosticKind::MissingModule,
                "No module declaration found in the file",
            ));
        }

        if self.brace_balance != 0 {
            let detail = if self.brace_balance > 0 {
                format!("{} more opening brace(s)", self.brace_balance)
            } else {
                format!("{} more closing brace(s)", self.brace_balance.unsigned_abs())
            };
            self.record(Diagnostic::file_level(
                DiagnosticKind::UnbalancedBraces,
                format!("Unbalanced braces in YANG file - {}", detail),
            ));
        }

        if self.in_quotes {
            self.record(Diagnostic::file_level(
                DiagnosticKind::UnclosedQuotes,
                "Unclosed quotes in the file",
            ));
        }

        self.report.lines_checked = self.line_number;
        self.report
    }
}
