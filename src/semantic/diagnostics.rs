//! Diagnostics: recoverable semantic errors.
//!
//! The builder records a [`SemanticError`] and falls back to a best-effort
//! conversion (first wins, drop the offending construct), so one bad
//! declaration never aborts the unit.

use crate::parser::Severity;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// A recoverable error found while building the program model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SemanticError {
    /// 1-based source line of the declaration involved.
    pub line: u32,
    pub severity: Severity,
    /// Diagnostic code (e.g., "S0001").
    pub code: &'static str,
    pub message: String,
    /// Declaration the error is about, if any.
    pub symbol: Option<String>,
}

impl SemanticError {
    pub fn error(line: u32, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            line,
            severity: Severity::Error,
            code,
            message: message.into(),
            symbol: None,
        }
    }

    pub fn warning(line: u32, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(line, code, message)
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Format as "line N: CODE: message"
    pub fn format(&self) -> String {
        format!("line {}: {}: {}", self.line, self.code, self.message)
    }
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl std::error::Error for SemanticError {}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Semantic diagnostic codes.
pub mod codes {
    /// Enum member name already used by another member in the unit.
    pub const DUPLICATE_ENUM_MEMBER: &str = "S0001";
    /// `size_is` referent is neither a number nor a sibling parameter.
    pub const UNRESOLVED_SIZE_IS: &str = "S0002";
    /// More than one structural base interface.
    pub const MULTIPLE_BASES: &str = "S0003";
    /// Base interface was never defined.
    pub const MISSING_BASE: &str = "S0004";
    /// `uuid(...)` is not a valid GUID.
    pub const INVALID_UUID: &str = "S0005";
    /// `iid_is` referent is not a sibling parameter.
    pub const UNRESOLVED_IID_IS: &str = "S0006";
    /// Two declarations produce the same type name.
    pub const DUPLICATE_TYPE: &str = "S0007";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects semantic diagnostics for one unit.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    errors: Vec<SemanticError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: SemanticError) {
        tracing::debug!(code = error.code, line = error.line, "{}", error.message);
        self.errors.push(error);
    }

    pub fn duplicate_enum_member(&mut self, line: u32, member: &str, owner: &str, existing: &str) {
        self.add(
            SemanticError::error(
                line,
                codes::DUPLICATE_ENUM_MEMBER,
                format!(
                    "enum member '{}' in '{}' is already defined in '{}'",
                    member, owner, existing
                ),
            )
            .with_symbol(member),
        );
    }

    pub fn unresolved_size_is(&mut self, line: u32, method: &str, referent: &str) {
        self.add(
            SemanticError::error(
                line,
                codes::UNRESOLVED_SIZE_IS,
                format!("size_is({}) on '{}' does not name a parameter", referent, method),
            )
            .with_symbol(method),
        );
    }

    pub fn unresolved_iid_is(&mut self, line: u32, method: &str, referent: &str) {
        self.add(
            SemanticError::warning(
                line,
                codes::UNRESOLVED_IID_IS,
                format!("iid_is({}) on '{}' does not name a parameter", referent, method),
            )
            .with_symbol(method),
        );
    }

    pub fn multiple_bases(&mut self, line: u32, interface: &str, kept: &str, dropped: &str) {
        self.add(
            SemanticError::error(
                line,
                codes::MULTIPLE_BASES,
                format!(
                    "interface '{}' has more than one base; keeping '{}', ignoring '{}'",
                    interface, kept, dropped
                ),
            )
            .with_symbol(interface),
        );
    }

    pub fn missing_base(&mut self, line: u32, interface: &str, base: &str) {
        self.add(
            SemanticError::error(
                line,
                codes::MISSING_BASE,
                format!("base interface '{}' of '{}' is not defined", base, interface),
            )
            .with_symbol(interface),
        );
    }

    pub fn invalid_uuid(&mut self, line: u32, symbol: &str, text: &str) {
        self.add(
            SemanticError::warning(
                line,
                codes::INVALID_UUID,
                format!("'{}' is not a valid uuid on '{}'", text, symbol),
            )
            .with_symbol(symbol),
        );
    }

    pub fn duplicate_type(&mut self, line: u32, name: &str) {
        self.add(
            SemanticError::error(
                line,
                codes::DUPLICATE_TYPE,
                format!("type '{}' is already defined; first definition kept", name),
            )
            .with_symbol(name),
        );
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.iter().filter(|e| e.severity.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Diagnostics with the given code
    pub fn with_code(&self, code: &str) -> Vec<&SemanticError> {
        self.errors.iter().filter(|e| e.code == code).collect()
    }
}
