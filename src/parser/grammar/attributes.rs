//! Bracketed attribute lists: `[uuid(...), object, helpstring("...")]`

use crate::parser::ast::{AttrValue, AttributeSet};
use crate::parser::errors::{ErrorCode, Severity, SyntaxError};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

use super::expressions::{unescape_literal, unquote_if_literal};

impl<'a> Parser<'a> {
    /// AttributeList = '[' Attribute (',' Attribute)* ']'
    ///
    /// Returns an empty set when the current token is not `[`.
    pub(crate) fn parse_attributes(&mut self) -> Option<AttributeSet> {
        let mut attrs = AttributeSet::new();
        if !self.at(SyntaxKind::L_BRACKET) {
            return Some(attrs);
        }
        self.bump();
        while !self.at(SyntaxKind::R_BRACKET) {
            if self.at_eof() {
                self.expect(SyntaxKind::R_BRACKET)?;
            }
            let line = self.line();
            let range = self.current().map(|t| t.range()).unwrap_or_default();
            let name = self.expect_name()?;
            let value = if self.at(SyntaxKind::L_PAREN) {
                Some(self.parse_attribute_args(&name)?)
            } else {
                None
            };
            if !attrs.insert(&name, value) {
                self.errors.push(
                    SyntaxError::new(
                        line,
                        format!("duplicate attribute '{}'; first occurrence kept", name),
                        range,
                        ErrorCode::E0306,
                    )
                    .with_severity(Severity::Warning),
                );
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACKET)?;
        Some(attrs)
    }

    /// AttributeArgs = '(' ... ')'
    ///
    /// A lone string literal is unescaped. Anything else is split at top-level
    /// commas and kept as raw source text, so `uuid(0000-...)` and
    /// `size_is(, *pcb)` survive unchanged.
    fn parse_attribute_args(&mut self, name: &str) -> Option<AttrValue> {
        let single_string = self.speculate(|p| {
            p.expect(SyntaxKind::L_PAREN)?;
            let mut text = String::new();
            if !p.at(SyntaxKind::STRING) {
                return None;
            }
            while p.at(SyntaxKind::STRING) {
                let token = p.bump()?;
                text.push_str(&unescape_literal(token.text));
            }
            if !p.at(SyntaxKind::R_PAREN) {
                return None;
            }
            p.bump();
            Some(text)
        });
        if let Some(text) = single_string {
            return Some(AttrValue::Scalar(text));
        }

        let open = self.expect(SyntaxKind::L_PAREN)?;
        let mut parts = Vec::new();
        let mut depth = 0usize;
        let mut part_start = open.end();
        loop {
            match self.current_kind() {
                SyntaxKind::EOF => {
                    self.expect(SyntaxKind::R_PAREN)?;
                }
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN if depth == 0 => break,
                SyntaxKind::R_PAREN => depth -= 1,
                SyntaxKind::COMMA if depth == 0 => {
                    let offset = self.current().map(|t| t.offset).unwrap_or_default();
                    parts.push(self.slice(part_start, offset).trim().to_string());
                    part_start = offset + text_size::TextSize::from(1);
                }
                _ => {}
            }
            self.bump();
        }
        let close = self.current().map(|t| t.offset).unwrap_or_default();
        parts.push(self.slice(part_start, close).trim().to_string());
        self.bump();

        if name.eq_ignore_ascii_case("custom") && parts.len() >= 2 {
            let value = parts[1..].join(", ");
            return Some(AttrValue::Named {
                name: unquote_if_literal(&parts[0]),
                value: unquote_if_literal(&value),
            });
        }
        if parts.len() == 1 {
            Some(AttrValue::Scalar(unquote_if_literal(&parts[0])))
        } else {
            Some(AttrValue::Args(parts))
        }
    }
}
