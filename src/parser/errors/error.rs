//! Syntax error types
//!
//! Provides error information for the IDL parser:
//! - Error codes for categorization
//! - Severity levels
//! - The set of tokens the parser expected and the token it found
//! - Optional hints for fixes

use std::fmt;

use text_size::TextRange;

use super::codes::ErrorCode;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error; the offending construct was skipped or replaced
    #[default]
    Error,
    /// A warning that doesn't change the generated output
    Warning,
    /// An informational hint
    Hint,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

/// A recoverable syntax error
///
/// The parser records one of these, skips to the next statement terminator
/// and keeps going, so a unit can report many of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based line of the offending token
    pub line: u32,
    /// Descriptions of the tokens that would have been accepted
    pub expected: Vec<String>,
    /// Text of the token actually found (`<eof>` at end of input)
    pub found: String,
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    /// Error severity
    pub severity: Severity,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

impl SyntaxError {
    /// Create an "expected X, found Y" error
    pub fn expected(
        line: u32,
        expected: Vec<String>,
        found: impl Into<String>,
        range: TextRange,
        code: ErrorCode,
    ) -> Self {
        let found = found.into();
        let message = match expected.as_slice() {
            [] => format!("{} '{}'", code.default_message(), found),
            [single] => format!("expected {}, found '{}'", single, found),
            many => format!("expected one of {}, found '{}'", many.join(", "), found),
        };
        Self {
            line,
            expected,
            found,
            message,
            range,
            code,
            severity: Severity::Error,
            hint: None,
        }
    }

    /// Create an error with a free-form message
    pub fn new(line: u32, message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            line,
            expected: Vec::new(),
            found: String::new(),
            message: message.into(),
            range,
            code,
            severity: Severity::Error,
            hint: None,
        }
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Format the error for display
    pub fn format(&self) -> String {
        let mut result = format!("line {}: {}: {}", self.line, self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    #[test]
    fn test_expected_single_message() {
        let err = SyntaxError::expected(
            3,
            vec!["';'".to_string()],
            "}",
            TextRange::empty(TextSize::new(10)),
            ErrorCode::E0201,
        );
        assert_eq!(err.message, "expected ';', found '}'");
        assert_eq!(err.line, 3);
        assert_eq!(err.found, "}");
        assert_eq!(err.severity, Severity::Error);
    }

    #[test]
    fn test_expected_many_message() {
        let err = SyntaxError::expected(
            1,
            vec!["'interface'".to_string(), "'coclass'".to_string()],
            "foo",
            TextRange::empty(TextSize::new(0)),
            ErrorCode::E0302,
        );
        assert_eq!(err.message, "expected one of 'interface', 'coclass', found 'foo'");
    }

    #[test]
    fn test_format_with_hint() {
        let err = SyntaxError::new(7, "expected ';'", TextRange::empty(TextSize::new(10)), ErrorCode::E0201)
            .with_hint("add semicolon");

        let formatted = err.format();
        assert!(formatted.starts_with("line 7: E0201"));
        assert!(formatted.contains("hint: add semicolon"));
    }

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert_eq!(Severity::Hint.as_str(), "hint");
    }
}
