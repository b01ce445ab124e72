//! Type references and declarators

use crate::parser::ast::{ArrayDim, Name, TypeRef};
use crate::parser::errors::ErrorCode;
use crate::parser::keywords;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

impl<'a> Parser<'a> {
    /// Skip `const` qualifiers and calling-convention decorations.
    pub(crate) fn skip_decorations(&mut self) {
        loop {
            if self.at(SyntaxKind::CONST_KW) {
                self.bump();
            } else if self.at(SyntaxKind::IDENT) && keywords::is_ignored_decoration(self.current_text()) {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Type = Decorations* ('struct'|'union'|'enum'|'interface')? BaseType Pointer*
    ///
    /// BaseType is a multi-word primitive (`unsigned long int`),
    /// `SAFEARRAY(Type)`, or a dot-qualified name.
    pub(crate) fn parse_type(&mut self) -> Option<TypeRef> {
        self.skip_decorations();
        if self.at_any(&[
            SyntaxKind::STRUCT_KW,
            SyntaxKind::UNION_KW,
            SyntaxKind::ENUM_KW,
            SyntaxKind::INTERFACE_KW,
        ]) {
            self.bump();
        }

        let mut ty = if self.at_any(&[SyntaxKind::UNSIGNED_KW, SyntaxKind::SIGNED_KW])
            || (self.at(SyntaxKind::IDENT) && keywords::is_integer_word(self.current_text()))
        {
            self.parse_primitive_words()
        } else if self.at_ident("SAFEARRAY") && self.nth(1) == SyntaxKind::L_PAREN {
            self.bump();
            self.bump();
            let element = self.parse_type()?;
            self.expect(SyntaxKind::R_PAREN)?;
            TypeRef {
                base_name: Name::from("SAFEARRAY"),
                array_rank: 0,
                type_arguments: vec![element],
            }
        } else if self.at(SyntaxKind::IDENT) {
            TypeRef::named(self.parse_qualified_name()?)
        } else {
            self.error_expected(&["type"], ErrorCode::E0303);
            return None;
        };

        ty.array_rank += self.parse_pointers();
        Some(ty)
    }

    fn parse_primitive_words(&mut self) -> TypeRef {
        let mut words: Vec<&str> = Vec::new();
        loop {
            let text = self.current_text();
            let is_sign = self.at_any(&[SyntaxKind::UNSIGNED_KW, SyntaxKind::SIGNED_KW]);
            let is_word = self.at(SyntaxKind::IDENT) && keywords::is_integer_word(text);
            if !(is_sign || is_word) {
                break;
            }
            words.push(text);
            self.bump();
        }
        TypeRef::named(keywords::normalize_primitive(&words))
    }

    /// Pointer = ('*' | '&') Decorations*
    pub(crate) fn parse_pointers(&mut self) -> u32 {
        let mut rank = 0;
        loop {
            self.skip_decorations();
            if self.at_any(&[SyntaxKind::STAR, SyntaxKind::AMP]) {
                self.bump();
                rank += 1;
            } else {
                break;
            }
        }
        rank
    }

    /// ArrayDims = ('[' ConstExpr? ']' | '[' '*' ']')*
    pub(crate) fn parse_array_dims(&mut self) -> Option<Vec<ArrayDim>> {
        let mut dims = Vec::new();
        while self.eat(SyntaxKind::L_BRACKET) {
            let size = if self.at(SyntaxKind::R_BRACKET) {
                None
            } else if self.at(SyntaxKind::STAR) && self.nth(1) == SyntaxKind::R_BRACKET {
                self.bump();
                None
            } else {
                Some(self.parse_expr()?)
            };
            self.expect(SyntaxKind::R_BRACKET)?;
            dims.push(ArrayDim { size });
        }
        Some(dims)
    }

    /// Declarator = Pointer* Name ArrayDims
    ///
    /// Returns the pointer depth, the name, and the dimensions.
    pub(crate) fn parse_declarator(&mut self) -> Option<(u32, Name, Vec<ArrayDim>)> {
        let rank = self.parse_pointers();
        let name = self.expect_name()?;
        let dims = self.parse_array_dims()?;
        Some((rank, name, dims))
    }
}
