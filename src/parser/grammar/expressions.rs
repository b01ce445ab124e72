//! Constant expression parsing
//!
//! Precedence chain, lowest first:
//!
//! ```text
//! OrExpr → XorExpr → AndExpr → ShiftExpr → AddExpr → MulExpr
//!     → UnaryExpr (- + ~ ! cast sizeof) → PrimaryExpr
//! ```

use crate::parser::ast::{BinaryOp, Expr, Name, UnaryOp};
use crate::parser::errors::ErrorCode;
use crate::parser::keywords;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Binary operator levels, lowest precedence first
const LEVELS: &[&[(SyntaxKind, BinaryOp)]] = &[
    &[(SyntaxKind::PIPE, BinaryOp::BitOr)],
    &[(SyntaxKind::CARET, BinaryOp::BitXor)],
    &[(SyntaxKind::AMP, BinaryOp::BitAnd)],
    &[(SyntaxKind::SHL, BinaryOp::Shl), (SyntaxKind::SHR, BinaryOp::Shr)],
    &[(SyntaxKind::PLUS, BinaryOp::Add), (SyntaxKind::MINUS, BinaryOp::Sub)],
    &[
        (SyntaxKind::STAR, BinaryOp::Mul),
        (SyntaxKind::SLASH, BinaryOp::Div),
        (SyntaxKind::PERCENT, BinaryOp::Mod),
    ],
];

impl<'a> Parser<'a> {
    /// Expr = OrExpr
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_binary_level(0)
    }

    fn parse_binary_level(&mut self, level: usize) -> Option<Expr> {
        let Some(ops) = LEVELS.get(level) else {
            return self.parse_unary();
        };
        let mut lhs = self.parse_binary_level(level + 1)?;
        loop {
            let kind = self.current_kind();
            let Some(&(_, op)) = ops.iter().find(|(k, _)| *k == kind) else {
                break;
            };
            self.bump();
            let rhs = match self.parse_binary_level(level + 1) {
                Some(rhs) => rhs,
                None => {
                    self.error(format!("missing operand after '{}'", op.as_str()), ErrorCode::E0402);
                    return None;
                }
            };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Some(lhs)
    }

    /// UnaryExpr = ('-' | '+' | '~' | '!') UnaryExpr | Cast | 'sizeof' '(' Type ')' | PrimaryExpr
    pub(crate) fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.current_kind() {
            SyntaxKind::MINUS => Some(UnaryOp::Neg),
            SyntaxKind::PLUS => Some(UnaryOp::Plus),
            SyntaxKind::TILDE => Some(UnaryOp::BitNot),
            SyntaxKind::BANG => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let inner = self.parse_unary()?;
            return Some(Expr::Unary(op, Box::new(inner)));
        }

        match self.current_kind() {
            SyntaxKind::L_PAREN => {
                if let Some(cast) = self.speculate(|p| p.parse_cast()) {
                    return Some(cast);
                }
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(SyntaxKind::R_PAREN)?;
                Some(Expr::Paren(Box::new(inner)))
            }
            SyntaxKind::SIZEOF_KW => {
                self.bump();
                self.expect(SyntaxKind::L_PAREN)?;
                let ty = self.parse_type()?;
                self.expect(SyntaxKind::R_PAREN)?;
                Some(Expr::SizeOf(ty))
            }
            _ => self.parse_primary(),
        }
    }

    /// Cast = '(' Type ')' UnaryExpr
    ///
    /// `(A) - 1` is only a cast when `A` is a primitive or pointer type;
    /// otherwise it is a parenthesized operand.
    fn parse_cast(&mut self) -> Option<Expr> {
        self.expect(SyntaxKind::L_PAREN)?;
        let primitive = self.at_any(&[SyntaxKind::UNSIGNED_KW, SyntaxKind::SIGNED_KW])
            || (self.at(SyntaxKind::IDENT) && keywords::is_integer_word(self.current_text()));
        let ty = self.parse_type()?;
        self.expect(SyntaxKind::R_PAREN)?;
        let operand_follows = match self.current_kind() {
            SyntaxKind::INTEGER
            | SyntaxKind::FLOAT
            | SyntaxKind::CHAR
            | SyntaxKind::STRING
            | SyntaxKind::IDENT
            | SyntaxKind::L_PAREN
            | SyntaxKind::TILDE
            | SyntaxKind::BANG
            | SyntaxKind::SIZEOF_KW
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW => true,
            SyntaxKind::MINUS | SyntaxKind::PLUS => primitive || ty.array_rank > 0,
            _ => false,
        };
        if !operand_follows {
            return None;
        }
        let inner = self.parse_unary()?;
        Some(Expr::Cast(ty, Box::new(inner)))
    }

    /// PrimaryExpr = Integer | Float | String+ | Char | Bool | QualifiedName
    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current_kind() {
            SyntaxKind::INTEGER => {
                let text = self.current_text();
                match parse_integer(text) {
                    Some(expr) => {
                        self.bump();
                        Some(expr)
                    }
                    None => {
                        self.error(format!("invalid integer literal '{}'", text), ErrorCode::E0102);
                        None
                    }
                }
            }
            SyntaxKind::FLOAT => {
                let text = self.current_text();
                let digits = text.trim_end_matches(['f', 'F', 'l', 'L']);
                match digits.parse::<f64>() {
                    Ok(value) => {
                        self.bump();
                        Some(Expr::Float(value))
                    }
                    Err(_) => {
                        self.error(format!("invalid floating-point literal '{}'", text), ErrorCode::E0102);
                        None
                    }
                }
            }
            SyntaxKind::STRING => {
                let mut value = String::new();
                while self.at(SyntaxKind::STRING) {
                    let token = self.bump()?;
                    value.push_str(&unescape_literal(token.text));
                }
                Some(Expr::Str(value))
            }
            SyntaxKind::CHAR => {
                let token = self.bump()?;
                let value = unescape_literal(token.text);
                Some(Expr::Char(value.chars().next().unwrap_or('\0')))
            }
            SyntaxKind::TRUE_KW => {
                self.bump();
                Some(Expr::Bool(true))
            }
            SyntaxKind::FALSE_KW => {
                self.bump();
                Some(Expr::Bool(false))
            }
            SyntaxKind::IDENT => self.parse_qualified_name().map(Expr::Ident),
            _ => {
                self.error_expected(&["constant expression"], ErrorCode::E0401);
                None
            }
        }
    }

    /// QualifiedName = Ident ('.' Ident)*
    pub(crate) fn parse_qualified_name(&mut self) -> Option<Name> {
        let mut name = self.expect_name()?.to_string();
        while self.at(SyntaxKind::DOT) && self.nth(1).is_word() {
            self.bump();
            name.push('.');
            name.push_str(self.current_text());
            self.bump();
        }
        Some(Name::from(name))
    }
}

/// Parse an integer literal with C radix prefixes and `u`/`l` suffixes.
pub(crate) fn parse_integer(text: &str) -> Option<Expr> {
    let digits = text.trim_end_matches(['u', 'U', 'l', 'L']);
    let suffix = &text[digits.len()..];
    let unsigned = suffix.contains(['u', 'U']);
    let long = suffix.contains(['l', 'L']);
    let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };
    Some(Expr::Int {
        value,
        text: text.to_string(),
        unsigned,
        long,
    })
}

/// Strip the quotes (and any `L` prefix) from a string or character literal
/// and resolve C escape sequences.
pub(crate) fn unescape_literal(text: &str) -> String {
    let body = text.strip_prefix('L').unwrap_or(text);
    let body = if body.len() >= 2 {
        &body[1..body.len() - 1]
    } else {
        body
    };
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('x') => {
                let mut hex = String::new();
                while let Some(&h) = chars.peek() {
                    if h.is_ascii_hexdigit() && hex.len() < 4 {
                        hex.push(h);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => out.push_str("\\x"),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Unquote `text` if it is a string literal, otherwise return it trimmed.
pub(crate) fn unquote_if_literal(text: &str) -> String {
    let trimmed = text.trim();
    let is_quoted = (trimmed.starts_with('"') || trimmed.starts_with("L\""))
        && trimmed.ends_with('"')
        && trimmed.len() >= 2;
    if is_quoted {
        unescape_literal(trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_radixes() {
        assert!(matches!(parse_integer("0x1F"), Some(Expr::Int { value: 31, .. })));
        assert!(matches!(parse_integer("017"), Some(Expr::Int { value: 15, .. })));
        assert!(matches!(parse_integer("0"), Some(Expr::Int { value: 0, .. })));
        assert!(matches!(
            parse_integer("42UL"),
            Some(Expr::Int { value: 42, unsigned: true, long: true, .. })
        ));
        assert!(parse_integer("09").is_none());
    }

    #[test]
    fn test_unescape_literal() {
        assert_eq!(unescape_literal(r#""a\"b\\c""#), "a\"b\\c");
        assert_eq!(unescape_literal(r#"L"wide\n""#), "wide\n");
        assert_eq!(unescape_literal(r"'\x41'"), "A");
    }

    #[test]
    fn test_unquote_if_literal() {
        assert_eq!(unquote_if_literal(" \"x\" "), "x");
        assert_eq!(unquote_if_literal(" cb "), "cb");
    }
}
