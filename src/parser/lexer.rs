//! Logos-based lexer for IDL
//!
//! Fast tokenization using the logos crate. Trivia is kept in the token
//! stream; the parser filters it.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    pub fn end(&self) -> TextSize {
        self.range().end()
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Skip to the closing `*/`; an unterminated comment is an error token.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"#[^\n]*")]
    Preprocessor,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*")]
    #[regex(r"[0-9]+[uUlL]*")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?[fFlL]?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fFlL]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFlL]?")]
    Float,

    #[regex(r#"L?"([^"\\]|\\.)*""#)]
    String,

    #[regex(r"L?'([^'\\]|\\.)*'")]
    Char,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("library")]
    LibraryKw,
    #[token("module")]
    ModuleKw,
    #[token("interface")]
    InterfaceKw,
    #[token("dispinterface")]
    DispinterfaceKw,
    #[token("coclass")]
    CoclassKw,
    #[token("typedef")]
    TypedefKw,
    #[token("struct")]
    StructKw,
    #[token("union")]
    UnionKw,
    #[token("enum")]
    EnumKw,
    #[token("const")]
    ConstKw,
    #[token("exception")]
    ExceptionKw,
    #[token("import")]
    ImportKw,
    #[token("importlib")]
    ImportlibKw,
    #[token("cpp_quote")]
    CppQuoteKw,
    #[token("midl_pragma")]
    MidlPragmaKw,
    #[token("switch")]
    SwitchKw,
    #[token("case")]
    CaseKw,
    #[token("default")]
    DefaultKw,
    #[token("unsigned")]
    UnsignedKw,
    #[token("signed")]
    SignedKw,
    #[token("sizeof")]
    SizeofKw,
    #[token("properties")]
    PropertiesKw,
    #[token("methods")]
    MethodsKw,
    #[token("TRUE")]
    #[token("true")]
    TrueKw,
    #[token("FALSE")]
    #[token("false")]
    FalseKw,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("*")]
    Star,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("?")]
    Question,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Preprocessor => SyntaxKind::PREPROCESSOR,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::Float => SyntaxKind::FLOAT,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::Char => SyntaxKind::CHAR,
            LogosToken::LibraryKw => SyntaxKind::LIBRARY_KW,
            LogosToken::ModuleKw => SyntaxKind::MODULE_KW,
            LogosToken::InterfaceKw => SyntaxKind::INTERFACE_KW,
            LogosToken::DispinterfaceKw => SyntaxKind::DISPINTERFACE_KW,
            LogosToken::CoclassKw => SyntaxKind::COCLASS_KW,
            LogosToken::TypedefKw => SyntaxKind::TYPEDEF_KW,
            LogosToken::StructKw => SyntaxKind::STRUCT_KW,
            LogosToken::UnionKw => SyntaxKind::UNION_KW,
            LogosToken::EnumKw => SyntaxKind::ENUM_KW,
            LogosToken::ConstKw => SyntaxKind::CONST_KW,
            LogosToken::ExceptionKw => SyntaxKind::EXCEPTION_KW,
            LogosToken::ImportKw => SyntaxKind::IMPORT_KW,
            LogosToken::ImportlibKw => SyntaxKind::IMPORTLIB_KW,
            LogosToken::CppQuoteKw => SyntaxKind::CPP_QUOTE_KW,
            LogosToken::MidlPragmaKw => SyntaxKind::MIDL_PRAGMA_KW,
            LogosToken::SwitchKw => SyntaxKind::SWITCH_KW,
            LogosToken::CaseKw => SyntaxKind::CASE_KW,
            LogosToken::DefaultKw => SyntaxKind::DEFAULT_KW,
            LogosToken::UnsignedKw => SyntaxKind::UNSIGNED_KW,
            LogosToken::SignedKw => SyntaxKind::SIGNED_KW,
            LogosToken::SizeofKw => SyntaxKind::SIZEOF_KW,
            LogosToken::PropertiesKw => SyntaxKind::PROPERTIES_KW,
            LogosToken::MethodsKw => SyntaxKind::METHODS_KW,
            LogosToken::TrueKw => SyntaxKind::TRUE_KW,
            LogosToken::FalseKw => SyntaxKind::FALSE_KW,
            LogosToken::Ellipsis => SyntaxKind::ELLIPSIS,
            LogosToken::Shl => SyntaxKind::SHL,
            LogosToken::Shr => SyntaxKind::SHR,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Question => SyntaxKind::QUESTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_lex_interface_header() {
        assert_eq!(
            kinds("interface IFoo : IUnknown {"),
            vec![
                SyntaxKind::INTERFACE_KW,
                SyntaxKind::IDENT,
                SyntaxKind::COLON,
                SyntaxKind::IDENT,
                SyntaxKind::L_BRACE,
            ]
        );
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(
            kinds("0x1F 42L 3.5 1e3 7u"),
            vec![
                SyntaxKind::INTEGER,
                SyntaxKind::INTEGER,
                SyntaxKind::FLOAT,
                SyntaxKind::FLOAT,
                SyntaxKind::INTEGER,
            ]
        );
    }

    #[test]
    fn test_lex_strings_and_prefix() {
        let tokens = tokenize(r#"L"wide" "a\"b" 'c'"#);
        let significant: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(significant[0].kind, SyntaxKind::STRING);
        assert_eq!(significant[0].text, r#"L"wide""#);
        assert_eq!(significant[1].text, r#""a\"b""#);
        assert_eq!(significant[2].kind, SyntaxKind::CHAR);
    }

    #[test]
    fn test_lex_preprocessor_line() {
        let tokens = tokenize("#pragma pack(4)\ninterface");
        assert_eq!(tokens[0].kind, SyntaxKind::PREPROCESSOR);
        assert_eq!(tokens[0].text, "#pragma pack(4)");
        assert_eq!(tokens[2].kind, SyntaxKind::INTERFACE_KW);
    }

    #[test]
    fn test_token_offsets() {
        let tokens = tokenize("a  bc");
        assert_eq!(tokens[2].offset, TextSize::new(3));
        assert_eq!(tokens[2].end(), TextSize::new(5));
    }

    #[test]
    fn test_comments_are_trivia() {
        assert_eq!(kinds("/* x */ a // y\n b"), vec![SyntaxKind::IDENT, SyntaxKind::IDENT]);
    }

    #[rstest]
    #[case("/**/")]
    #[case("/* a * b */")]
    #[case("/* x **/")]
    #[case("/*\n * banner\n */")]
    fn test_block_comment_forms(#[case] comment: &str) {
        let tokens = tokenize(comment);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens[0].text, comment);
    }

    #[test]
    fn test_unterminated_block_comment_is_error() {
        let tokens = tokenize("a /* open");
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::ERROR));
    }
}
