//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, semicolons)
//! - E03xx: Declaration errors (interfaces, coclasses, types)
//! - E04xx: Constant expression errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Invalid numeric literal
    E0102,

    // =========================================================================
    // E02xx: Structural errors (braces, semicolons, delimiters)
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Expected a declaration keyword after an attribute list
    E0302,
    /// Invalid type specification
    E0303,
    /// Invalid member in an interface or coclass body
    E0304,
    /// Invalid parameter declaration
    E0305,
    /// Invalid attribute
    E0306,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Invalid constant expression
    E0401,
    /// Missing operand in expression
    E0402,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Expected a specific token
    E0902,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0902 => "E0902",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 | Self::E0306 => {
                "declaration error"
            }
            Self::E0401 | Self::E0402 => "expression error",
            Self::E0902 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "invalid numeric literal",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0301 => "missing identifier",
            Self::E0302 => "expected declaration",
            Self::E0303 => "invalid type",
            Self::E0304 => "invalid body member",
            Self::E0305 => "invalid parameter",
            Self::E0306 => "invalid attribute",
            Self::E0401 => "invalid constant expression",
            Self::E0402 => "missing operand",
            Self::E0902 => "expected token",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0201), "E0201");
        assert_eq!(ErrorCode::E0902.as_str(), "E0902");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0201.category_description(), "structural error");
        assert_eq!(ErrorCode::E0305.category_description(), "declaration error");
        assert_eq!(ErrorCode::E0401.category_description(), "expression error");
    }

    #[test]
    fn test_is_structural() {
        assert!(ErrorCode::E0202.is_structural());
        assert!(!ErrorCode::E0301.is_structural());
    }
}
