//! Recursive descent parser for IDL
//!
//! Builds a [`DeclarationTree`] from tokens.
//! Supports statement-level error recovery and bounded backtracking through
//! [`Parser::speculate`].

use text_size::{TextRange, TextSize};

use super::ast::{DeclarationTree, Name};
use super::errors::{ErrorCode, SyntaxError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use crate::base::LineIndex;

/// Parse result containing the declaration tree and any errors
#[derive(Debug, Clone, Default)]
pub struct Parse {
    pub tree: DeclarationTree,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Check if parsing succeeded without errors; warnings do not count
    pub fn ok(&self) -> bool {
        !self.errors.iter().any(|e| e.severity.is_error())
    }

    /// Convert into the strict form: the tree, or every recorded diagnostic
    pub fn into_result(self) -> Result<DeclarationTree, Vec<SyntaxError>> {
        if self.ok() {
            Ok(self.tree)
        } else {
            Err(self.errors)
        }
    }
}

/// Parse IDL source, recovering from malformed declarations.
///
/// The returned tree holds every declaration that parsed; `errors` lists
/// everything that was skipped.
pub fn parse(input: &str) -> Parse {
    let mut lex_errors = Vec::new();
    let line_index = LineIndex::new(input);
    let tokens: Vec<_> = Lexer::new(input)
        .filter(|token| {
            if token.kind == SyntaxKind::ERROR {
                lex_errors.push(SyntaxError::new(
                    line_index.line(token.offset),
                    format!("invalid character '{}'", token.text),
                    token.range(),
                    ErrorCode::E0101,
                ));
                return false;
            }
            !token.kind.is_trivia()
        })
        .collect();

    let mut parser = Parser::new(input, tokens, line_index);
    parser.errors = lex_errors;
    let declarations = parser.parse_declarations(false);
    tracing::debug!(
        declarations = declarations.len(),
        errors = parser.errors.len(),
        "parsed IDL unit"
    );
    parser.finish(declarations)
}

/// Parse IDL source; any syntax error fails the whole unit.
pub fn compile(input: &str) -> Result<DeclarationTree, Vec<SyntaxError>> {
    parse(input).into_result()
}

/// The parser state
pub(crate) struct Parser<'a> {
    pub(crate) source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    pub(crate) errors: Vec<SyntaxError>,
    line_index: LineIndex,
    speculating: u32,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<Token<'a>>, line_index: LineIndex) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            errors: Vec::new(),
            line_index,
            speculating: 0,
        }
    }

    fn finish(self, declarations: Vec<super::ast::Declaration>) -> Parse {
        Parse {
            tree: DeclarationTree { declarations },
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(crate) fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn current_text(&self) -> &'a str {
        self.nth_text(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'a str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    /// At an identifier with exactly this text
    pub(crate) fn at_ident(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// 1-based line of the current token (last line at end of input)
    pub(crate) fn line(&self) -> u32 {
        let offset = self
            .current()
            .map(|t| t.offset)
            .unwrap_or_else(|| TextSize::of(self.source));
        self.line_index.line(offset)
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> Option<Token<'a>> {
        if self.at(kind) {
            self.bump()
        } else {
            let code = match kind {
                SyntaxKind::SEMICOLON => ErrorCode::E0201,
                SyntaxKind::R_BRACE => ErrorCode::E0202,
                SyntaxKind::R_PAREN => ErrorCode::E0203,
                SyntaxKind::R_BRACKET => ErrorCode::E0204,
                SyntaxKind::IDENT => ErrorCode::E0301,
                _ => ErrorCode::E0902,
            };
            self.error_expected(&[kind.describe()], code);
            None
        }
    }

    /// Expect a name; keywords are accepted where IDL allows them as names.
    pub(crate) fn expect_name(&mut self) -> Option<Name> {
        if self.current_kind().is_word() {
            self.bump().map(|t| Name::from(t.text))
        } else {
            self.error_expected(&["identifier"], ErrorCode::E0301);
            None
        }
    }

    /// Source text between two byte offsets
    pub(crate) fn slice(&self, start: TextSize, end: TextSize) -> &'a str {
        &self.source[TextRange::new(start, end)]
    }

    /// Offset just past the previously consumed token
    pub(crate) fn prev_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.end())
            .unwrap_or_default()
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error_expected(&mut self, expected: &[&str], code: ErrorCode) {
        let (found, range) = match self.current() {
            Some(t) => (t.text.to_string(), t.range()),
            None => (
                "<eof>".to_string(),
                TextRange::empty(TextSize::of(self.source)),
            ),
        };
        let line = self.line();
        self.errors.push(SyntaxError::expected(
            line,
            expected.iter().map(|e| e.to_string()).collect(),
            found,
            range,
            code,
        ));
    }

    pub(crate) fn error(&mut self, message: impl Into<String>, code: ErrorCode) {
        let range = self
            .current()
            .map(|t| t.range())
            .unwrap_or_else(|| TextRange::empty(TextSize::of(self.source)));
        let line = self.line();
        self.errors.push(SyntaxError::new(line, message, range, code));
    }

    /// Run a speculative parse; on failure rewind the cursor and drop its errors.
    pub(crate) fn speculate<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.pos;
        let error_count = self.errors.len();
        self.speculating += 1;
        let result = f(self);
        self.speculating -= 1;
        if result.is_none() {
            tracing::trace!(
                line = self.line(),
                depth = self.speculating,
                "speculative parse failed, rewinding"
            );
            self.pos = checkpoint;
            self.errors.truncate(error_count);
        }
        result
    }

    /// Skip to just past the next `;` at the current brace depth, or up to
    /// the `}` that closes the enclosing block. Always makes progress.
    pub(crate) fn recover_statement(&mut self) {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(kind) = self.current().map(|t| t.kind) {
            match kind {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        self.eat(SyntaxKind::SEMICOLON);
                        return;
                    }
                }
                SyntaxKind::SEMICOLON if depth == 0 => {
                    self.pos += 1;
                    return;
                }
                _ => {}
            }
            self.pos += 1;
        }
        if self.pos == start && !self.at_eof() {
            self.pos += 1;
        }
    }

    /// Skip a balanced `open ... close` group starting at the current token.
    pub(crate) fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) -> Option<()> {
        self.expect(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current_kind() {
                SyntaxKind::EOF => {
                    self.error_expected(&[close.describe()], ErrorCode::E0202);
                    return None;
                }
                kind if kind == open => depth += 1,
                kind if kind == close => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        let parse = parse("");
        assert!(parse.ok());
        assert!(parse.tree.declarations.is_empty());
    }

    #[test]
    fn test_invalid_character_is_reported() {
        let parse = parse("@ interface IFoo;");
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].code, ErrorCode::E0101);
        assert_eq!(parse.tree.declarations.len(), 1);
    }

    #[test]
    fn test_compile_returns_errors() {
        let result = compile("interface ;");
        let errors = result.unwrap_err();
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[0].expected, vec!["identifier".to_string()]);
        assert_eq!(errors[0].found, ";");
    }

    #[test]
    fn test_speculate_rewinds_on_failure() {
        let source = "a b";
        let tokens: Vec<_> = Lexer::new(source).filter(|t| !t.kind.is_trivia()).collect();
        let mut parser = Parser::new(source, tokens, LineIndex::new(source));
        let result: Option<()> = parser.speculate(|p| {
            p.bump();
            p.expect(SyntaxKind::SEMICOLON)?;
            Some(())
        });
        assert!(result.is_none());
        assert_eq!(parser.position(), 0);
        assert!(parser.errors.is_empty());
    }
}
