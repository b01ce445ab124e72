//! Token kinds for the IDL lexer
//!
//! IDL has many contextual words (`in`, `out`, `string`, `default`) that are
//! only meaningful inside attribute lists; those stay `IDENT`. Only words that
//! start a declaration or shape a type are keywords.

/// All token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - dropped before parsing)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // PASSTHROUGH
    // =========================================================================
    PREPROCESSOR, // #pragma, #include, #define ... (whole line)

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier
    INTEGER, // 42, 0x2A, 42L, 42u
    FLOAT,   // 3.14, 1e5
    STRING,  // "hello" or L"hello"
    CHAR,    // 'a'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_BRACKET, // [
    R_BRACKET, // ]
    L_PAREN,   // (
    R_PAREN,   // )
    SEMICOLON, // ;
    COLON,     // :
    COMMA,     // ,
    DOT,       // .
    ELLIPSIS,  // ...
    EQ,        // =
    LT,        // <
    GT,        // >
    SHL,       // <<
    SHR,       // >>
    STAR,      // *
    AMP,       // &
    PIPE,      // |
    CARET,     // ^
    TILDE,     // ~
    BANG,      // !
    PLUS,      // +
    MINUS,     // -
    SLASH,     // /
    PERCENT,   // %
    QUESTION,  // ?

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    LIBRARY_KW,
    MODULE_KW,
    INTERFACE_KW,
    DISPINTERFACE_KW,
    COCLASS_KW,
    TYPEDEF_KW,
    STRUCT_KW,
    UNION_KW,
    ENUM_KW,
    CONST_KW,
    EXCEPTION_KW,
    IMPORT_KW,
    IMPORTLIB_KW,
    CPP_QUOTE_KW,
    MIDL_PRAGMA_KW,
    SWITCH_KW,
    CASE_KW,
    DEFAULT_KW,
    UNSIGNED_KW,
    SIGNED_KW,
    SIZEOF_KW,
    PROPERTIES_KW,
    METHODS_KW,
    TRUE_KW,
    FALSE_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::LIBRARY_KW as u16) && (self as u16) <= (SyntaxKind::FALSE_KW as u16)
    }

    /// Identifiers and keywords; attribute names and member names accept any word.
    pub fn is_word(self) -> bool {
        self == SyntaxKind::IDENT || self.is_keyword()
    }

    /// Human-readable description used in "expected ..." messages
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxKind::IDENT => "identifier",
            SyntaxKind::INTEGER => "integer literal",
            SyntaxKind::FLOAT => "floating-point literal",
            SyntaxKind::STRING => "string literal",
            SyntaxKind::CHAR => "character literal",
            SyntaxKind::PREPROCESSOR => "preprocessor directive",
            SyntaxKind::L_BRACE => "'{'",
            SyntaxKind::R_BRACE => "'}'",
            SyntaxKind::L_BRACKET => "'['",
            SyntaxKind::R_BRACKET => "']'",
            SyntaxKind::L_PAREN => "'('",
            SyntaxKind::R_PAREN => "')'",
            SyntaxKind::SEMICOLON => "';'",
            SyntaxKind::COLON => "':'",
            SyntaxKind::COMMA => "','",
            SyntaxKind::DOT => "'.'",
            SyntaxKind::ELLIPSIS => "'...'",
            SyntaxKind::EQ => "'='",
            SyntaxKind::LT => "'<'",
            SyntaxKind::GT => "'>'",
            SyntaxKind::SHL => "'<<'",
            SyntaxKind::SHR => "'>>'",
            SyntaxKind::STAR => "'*'",
            SyntaxKind::AMP => "'&'",
            SyntaxKind::PIPE => "'|'",
            SyntaxKind::CARET => "'^'",
            SyntaxKind::TILDE => "'~'",
            SyntaxKind::BANG => "'!'",
            SyntaxKind::PLUS => "'+'",
            SyntaxKind::MINUS => "'-'",
            SyntaxKind::SLASH => "'/'",
            SyntaxKind::PERCENT => "'%'",
            SyntaxKind::QUESTION => "'?'",
            SyntaxKind::LIBRARY_KW => "'library'",
            SyntaxKind::MODULE_KW => "'module'",
            SyntaxKind::INTERFACE_KW => "'interface'",
            SyntaxKind::DISPINTERFACE_KW => "'dispinterface'",
            SyntaxKind::COCLASS_KW => "'coclass'",
            SyntaxKind::TYPEDEF_KW => "'typedef'",
            SyntaxKind::STRUCT_KW => "'struct'",
            SyntaxKind::UNION_KW => "'union'",
            SyntaxKind::ENUM_KW => "'enum'",
            SyntaxKind::CONST_KW => "'const'",
            SyntaxKind::EXCEPTION_KW => "'exception'",
            SyntaxKind::IMPORT_KW => "'import'",
            SyntaxKind::IMPORTLIB_KW => "'importlib'",
            SyntaxKind::CPP_QUOTE_KW => "'cpp_quote'",
            SyntaxKind::MIDL_PRAGMA_KW => "'midl_pragma'",
            SyntaxKind::SWITCH_KW => "'switch'",
            SyntaxKind::CASE_KW => "'case'",
            SyntaxKind::DEFAULT_KW => "'default'",
            SyntaxKind::UNSIGNED_KW => "'unsigned'",
            SyntaxKind::SIGNED_KW => "'signed'",
            SyntaxKind::SIZEOF_KW => "'sizeof'",
            SyntaxKind::PROPERTIES_KW => "'properties'",
            SyntaxKind::METHODS_KW => "'methods'",
            SyntaxKind::TRUE_KW => "'TRUE'",
            SyntaxKind::FALSE_KW => "'FALSE'",
            SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => "trivia",
            SyntaxKind::ERROR => "invalid token",
            SyntaxKind::EOF => "end of input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_ranges() {
        assert!(SyntaxKind::LIBRARY_KW.is_keyword());
        assert!(SyntaxKind::FALSE_KW.is_keyword());
        assert!(SyntaxKind::DEFAULT_KW.is_word());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(!SyntaxKind::ERROR.is_keyword());
        assert!(!SyntaxKind::QUESTION.is_word());
    }

    #[test]
    fn test_trivia() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::BLOCK_COMMENT.is_trivia());
        assert!(!SyntaxKind::PREPROCESSOR.is_trivia());
    }
}
