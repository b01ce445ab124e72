//! Top-level and block-level IDL declarations
//!
//! ```text
//! Declaration = Passthrough | Import | ImportLib
//!             | AttributeList? ( Library | Module | Interface | DispInterface
//!                              | CoClass | Typedef | Struct | Union | Enum
//!                              | Const | Exception )
//! ```

use crate::parser::ast::{
    AttributeSet, CoClassBase, CoClassDecl, ConstDecl, Declaration, EnumDecl, EnumMember,
    ExceptionDecl, FieldDecl, FunctionProto, ImportDecl, ImportLibDecl, InterfaceDecl, ModuleDecl,
    Name, Param, Passthrough, StructDecl, TypeRef, TypedefDecl, UnionDecl,
};
use crate::parser::errors::ErrorCode;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

use super::expressions::unescape_literal;

/// One item of a module or interface body
pub(crate) enum BodyItem {
    Decls(Vec<Declaration>),
    Function(FunctionProto),
}

/// Declaration keywords that can never start a function prototype
const DECLARATION_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::LIBRARY_KW,
    SyntaxKind::MODULE_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::DISPINTERFACE_KW,
    SyntaxKind::COCLASS_KW,
    SyntaxKind::TYPEDEF_KW,
    SyntaxKind::CONST_KW,
    SyntaxKind::EXCEPTION_KW,
];

/// Keywords that may start either a composite declaration or a function
/// returning a composite type
const COMPOSITE_KEYWORDS: &[SyntaxKind] =
    &[SyntaxKind::STRUCT_KW, SyntaxKind::UNION_KW, SyntaxKind::ENUM_KW];

/// Tokens handled before any attribute list
const PASSTHROUGH_STARTS: &[SyntaxKind] = &[
    SyntaxKind::PREPROCESSOR,
    SyntaxKind::CPP_QUOTE_KW,
    SyntaxKind::MIDL_PRAGMA_KW,
    SyntaxKind::IMPORT_KW,
    SyntaxKind::IMPORTLIB_KW,
];

impl<'a> Parser<'a> {
    // =========================================================================
    // Declaration lists
    // =========================================================================

    /// Parse declarations until end of input, or until the closing `}` when
    /// `in_block` is set. Malformed declarations are skipped.
    pub(crate) fn parse_declarations(&mut self, in_block: bool) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        loop {
            if self.at_eof() || (in_block && self.at(SyntaxKind::R_BRACE)) {
                break;
            }
            if self.eat(SyntaxKind::SEMICOLON) {
                continue;
            }
            let start = self.position();
            match self.parse_declaration() {
                Some(mut items) => declarations.append(&mut items),
                None => {
                    tracing::debug!(line = self.line(), "skipping malformed declaration");
                    self.recover_statement();
                }
            }
            if self.position() == start {
                self.bump();
            }
        }
        declarations
    }

    /// Parse the items of a `{ ... }` body up to (not including) the `}`.
    fn parse_body_items(&mut self, allow_functions: bool) -> (Vec<Declaration>, Vec<FunctionProto>) {
        let mut declarations = Vec::new();
        let mut functions = Vec::new();
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            if self.eat(SyntaxKind::SEMICOLON) {
                continue;
            }
            let start = self.position();
            match self.parse_body_item(allow_functions) {
                Some(BodyItem::Decls(mut items)) => declarations.append(&mut items),
                Some(BodyItem::Function(function)) => functions.push(function),
                None => {
                    tracing::debug!(line = self.line(), "skipping malformed body item");
                    self.recover_statement();
                }
            }
            if self.position() == start {
                self.bump();
            }
        }
        (declarations, functions)
    }

    /// BodyItem = Declaration | AttributeList? FunctionProto
    ///
    /// `struct`, `union` and `enum` are ambiguous between a nested type and a
    /// function returning one; the function reading is tried speculatively.
    pub(crate) fn parse_body_item(&mut self, allow_functions: bool) -> Option<BodyItem> {
        if self.at_any(PASSTHROUGH_STARTS) {
            return self.parse_declaration().map(BodyItem::Decls);
        }
        let line = self.line();
        let attrs = self.parse_attributes()?;

        if self.at_any(DECLARATION_KEYWORDS) || !allow_functions {
            return self
                .parse_attributed_declaration(attrs, line)
                .map(BodyItem::Decls);
        }
        if self.at_any(COMPOSITE_KEYWORDS) {
            let speculative_attrs = attrs.clone();
            if let Some(function) =
                self.speculate(|p| p.parse_function_proto(speculative_attrs, line))
            {
                return Some(BodyItem::Function(function));
            }
            return self
                .parse_attributed_declaration(attrs, line)
                .map(BodyItem::Decls);
        }
        self.parse_function_proto(attrs, line).map(BodyItem::Function)
    }

    /// Parse one declaration; typedefs may produce several.
    pub(crate) fn parse_declaration(&mut self) -> Option<Vec<Declaration>> {
        let line = self.line();
        match self.current_kind() {
            SyntaxKind::PREPROCESSOR => {
                let token = self.bump()?;
                let text = token.text.trim_end().to_string();
                Some(vec![Declaration::Pragma(Passthrough { text, line })])
            }
            SyntaxKind::CPP_QUOTE_KW => {
                self.bump();
                let text = self.parse_passthrough_text()?;
                self.eat(SyntaxKind::SEMICOLON);
                Some(vec![Declaration::CppQuote(Passthrough { text, line })])
            }
            SyntaxKind::MIDL_PRAGMA_KW => {
                self.bump();
                let text = self.parse_pragma_text()?;
                self.eat(SyntaxKind::SEMICOLON);
                Some(vec![Declaration::Pragma(Passthrough { text, line })])
            }
            SyntaxKind::IMPORT_KW => {
                self.bump();
                let mut files = Vec::new();
                loop {
                    let token = self.expect(SyntaxKind::STRING)?;
                    files.push(unescape_literal(token.text));
                    if !self.eat(SyntaxKind::COMMA) {
                        break;
                    }
                }
                self.expect(SyntaxKind::SEMICOLON)?;
                Some(vec![Declaration::Import(ImportDecl { files, line })])
            }
            SyntaxKind::IMPORTLIB_KW => {
                self.bump();
                self.expect(SyntaxKind::L_PAREN)?;
                let token = self.expect(SyntaxKind::STRING)?;
                self.expect(SyntaxKind::R_PAREN)?;
                self.expect(SyntaxKind::SEMICOLON)?;
                Some(vec![Declaration::ImportLib(ImportLibDecl {
                    file: unescape_literal(token.text),
                    line,
                })])
            }
            _ => {
                let attrs = self.parse_attributes()?;
                self.parse_attributed_declaration(attrs, line)
            }
        }
    }

    /// Raw source of a `midl_pragma` up to the terminating `;` or line end
    fn parse_pragma_text(&mut self) -> Option<String> {
        let start = self.current().map(|t| t.offset)?;
        let line = self.line();
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => depth = depth.saturating_sub(1),
                SyntaxKind::SEMICOLON if depth == 0 => break,
                _ if depth == 0 && self.line() != line => break,
                _ => {}
            }
            self.bump();
        }
        let end = self.prev_end();
        Some(self.slice(start, end).trim().to_string())
    }

    /// `( "text" )` for `cpp_quote`; anything else is kept as raw text
    fn parse_passthrough_text(&mut self) -> Option<String> {
        let open = self.expect(SyntaxKind::L_PAREN)?;
        if self.at(SyntaxKind::STRING) && self.nth(1) == SyntaxKind::R_PAREN {
            let token = self.bump()?;
            self.bump();
            return Some(unescape_literal(token.text));
        }
        let start = open.end();
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                SyntaxKind::EOF => {
                    self.expect(SyntaxKind::R_PAREN)?;
                }
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN if depth == 0 => break,
                SyntaxKind::R_PAREN => depth -= 1,
                _ => {}
            }
            self.bump();
        }
        let end = self.current().map(|t| t.offset).unwrap_or(start);
        let text = self.slice(start, end).trim().to_string();
        self.bump();
        Some(text)
    }

    fn parse_attributed_declaration(
        &mut self,
        attrs: AttributeSet,
        line: u32,
    ) -> Option<Vec<Declaration>> {
        match self.current_kind() {
            SyntaxKind::LIBRARY_KW | SyntaxKind::MODULE_KW => {
                self.parse_module(attrs, line).map(|d| vec![d])
            }
            SyntaxKind::INTERFACE_KW => self.parse_interface(attrs, line).map(|d| vec![d]),
            SyntaxKind::DISPINTERFACE_KW => self.parse_dispinterface(attrs, line).map(|d| vec![d]),
            SyntaxKind::COCLASS_KW => self.parse_coclass(attrs, line).map(|d| vec![d]),
            SyntaxKind::TYPEDEF_KW => self.parse_typedef(attrs, line),
            SyntaxKind::STRUCT_KW | SyntaxKind::UNION_KW | SyntaxKind::ENUM_KW => {
                let decl = self.parse_composite(attrs, line)?;
                self.expect(SyntaxKind::SEMICOLON)?;
                Some(decl.into_iter().collect())
            }
            SyntaxKind::CONST_KW => self.parse_const(line).map(|d| vec![d]),
            SyntaxKind::EXCEPTION_KW => self.parse_exception(line).map(|d| vec![d]),
            _ => {
                self.error_expected(&["declaration"], ErrorCode::E0302);
                None
            }
        }
    }

    // =========================================================================
    // Libraries and modules
    // =========================================================================

    /// Library = 'library' Name '{' Declaration* '}' ';'?
    /// Module  = 'module' Name '{' (Declaration | FunctionProto)* '}' ';'?
    fn parse_module(&mut self, attrs: AttributeSet, line: u32) -> Option<Declaration> {
        let is_library = self.at(SyntaxKind::LIBRARY_KW);
        self.bump();
        let name = self.expect_name()?;
        self.expect(SyntaxKind::L_BRACE)?;
        let (body, functions) = self.parse_body_items(!is_library);
        self.expect(SyntaxKind::R_BRACE)?;
        self.eat(SyntaxKind::SEMICOLON);
        tracing::trace!(%name, is_library, items = body.len(), "parsed module");
        Some(Declaration::Module(ModuleDecl {
            name,
            attrs,
            body,
            functions,
            is_library,
            line,
        }))
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    /// Interface = 'interface' Name ( ';' | (':' Name (',' Name)*)? '{' BodyItem* '}' ';'? )
    fn parse_interface(&mut self, attrs: AttributeSet, line: u32) -> Option<Declaration> {
        self.expect(SyntaxKind::INTERFACE_KW)?;
        let name = self.expect_name()?;
        if self.eat(SyntaxKind::SEMICOLON) {
            return Some(Declaration::Interface(forward_interface(name, attrs, false, line)));
        }

        let mut bases = Vec::new();
        if self.eat(SyntaxKind::COLON) {
            loop {
                bases.push(self.parse_qualified_name()?);
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }

        self.expect(SyntaxKind::L_BRACE)?;
        let (body, members) = self.parse_body_items(true);
        self.expect(SyntaxKind::R_BRACE)?;
        self.eat(SyntaxKind::SEMICOLON);

        Some(Declaration::Interface(InterfaceDecl {
            name,
            attrs,
            bases,
            members,
            properties: Vec::new(),
            body,
            is_forward_decl: false,
            is_dispinterface: false,
            line,
        }))
    }

    /// DispInterface = 'dispinterface' Name ( ';' | '{' DispBody '}' ';'? )
    /// DispBody = ('properties' ':' Field*)? ('methods' ':' FunctionProto*)?
    ///          | 'interface' Name ';'
    fn parse_dispinterface(&mut self, attrs: AttributeSet, line: u32) -> Option<Declaration> {
        self.expect(SyntaxKind::DISPINTERFACE_KW)?;
        let name = self.expect_name()?;
        if self.eat(SyntaxKind::SEMICOLON) {
            return Some(Declaration::Interface(forward_interface(name, attrs, true, line)));
        }

        let mut decl = InterfaceDecl {
            name,
            attrs,
            bases: Vec::new(),
            members: Vec::new(),
            properties: Vec::new(),
            body: Vec::new(),
            is_forward_decl: false,
            is_dispinterface: true,
            line,
        };

        self.expect(SyntaxKind::L_BRACE)?;
        if self.at(SyntaxKind::INTERFACE_KW) {
            self.bump();
            decl.bases.push(self.parse_qualified_name()?);
            self.expect(SyntaxKind::SEMICOLON)?;
        } else {
            if self.eat(SyntaxKind::PROPERTIES_KW) {
                self.expect(SyntaxKind::COLON)?;
                while !self.at_any(&[SyntaxKind::METHODS_KW, SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
                    let start = self.position();
                    match self.parse_field() {
                        Some(field) => decl.properties.push(field),
                        None => self.recover_statement(),
                    }
                    if self.position() == start {
                        self.bump();
                    }
                }
            }
            if self.eat(SyntaxKind::METHODS_KW) {
                self.expect(SyntaxKind::COLON)?;
                let (_, members) = self.parse_body_items(true);
                decl.members = members;
            }
        }
        self.expect(SyntaxKind::R_BRACE)?;
        self.eat(SyntaxKind::SEMICOLON);
        Some(Declaration::Interface(decl))
    }

    // =========================================================================
    // Coclasses
    // =========================================================================

    /// CoClass = 'coclass' Name '{' (AttributeList? ('interface'|'dispinterface') Name ';')* '}' ';'?
    fn parse_coclass(&mut self, attrs: AttributeSet, line: u32) -> Option<Declaration> {
        self.expect(SyntaxKind::COCLASS_KW)?;
        let name = self.expect_name()?;
        self.expect(SyntaxKind::L_BRACE)?;
        let mut base_interfaces = Vec::new();
        while !self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            let start = self.position();
            match self.parse_coclass_entry() {
                Some(entry) => base_interfaces.push(entry),
                None => self.recover_statement(),
            }
            if self.position() == start {
                self.bump();
            }
        }
        self.expect(SyntaxKind::R_BRACE)?;
        self.eat(SyntaxKind::SEMICOLON);
        Some(Declaration::CoClass(CoClassDecl {
            name,
            attrs,
            base_interfaces,
            line,
        }))
    }

    fn parse_coclass_entry(&mut self) -> Option<CoClassBase> {
        let attrs = self.parse_attributes()?;
        let is_dispinterface = match self.current_kind() {
            SyntaxKind::INTERFACE_KW => false,
            SyntaxKind::DISPINTERFACE_KW => true,
            _ => {
                self.error_expected(&["interface", "dispinterface"], ErrorCode::E0304);
                return None;
            }
        };
        self.bump();
        let name = self.parse_qualified_name()?;
        self.expect(SyntaxKind::SEMICOLON)?;
        Some(CoClassBase {
            name,
            attrs,
            is_dispinterface,
        })
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// FunctionProto = Type Decorations* Name '(' Params ')' ';'
    fn parse_function_proto(&mut self, attrs: AttributeSet, line: u32) -> Option<FunctionProto> {
        let return_type = self.parse_type()?;
        self.skip_decorations();
        let name = self.expect_name()?;
        self.expect(SyntaxKind::L_PAREN)?;
        let params = self.parse_params()?;
        self.expect(SyntaxKind::R_PAREN)?;
        self.expect(SyntaxKind::SEMICOLON)?;
        Some(FunctionProto {
            name,
            return_type,
            params,
            attrs,
            line,
        })
    }

    /// Params = 'void' | (Param (',' Param)*)?
    fn parse_params(&mut self) -> Option<Vec<Param>> {
        let mut params = Vec::new();
        if self.at(SyntaxKind::R_PAREN) {
            return Some(params);
        }
        if self.at_ident("void") && self.nth(1) == SyntaxKind::R_PAREN {
            self.bump();
            return Some(params);
        }
        loop {
            if self.eat(SyntaxKind::ELLIPSIS) {
                tracing::debug!(line = self.line(), "ignoring variadic parameter");
            } else {
                let index = params.len();
                params.push(self.parse_param(index)?);
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        Some(params)
    }

    /// Param = AttributeList? Type Name? ArrayDims
    ///
    /// Unnamed parameters get a positional name.
    fn parse_param(&mut self, index: usize) -> Option<Param> {
        let attrs = self.parse_attributes()?;
        if !(self.current_kind().is_word()) {
            self.error_expected(&["parameter"], ErrorCode::E0305);
            return None;
        }
        let ty = self.parse_type()?;
        let name = if self.current_kind().is_word() {
            self.expect_name()?
        } else {
            Name::from(format!("p{}", index))
        };
        let dims = self.parse_array_dims()?;
        Some(Param {
            name,
            ty,
            dims,
            attrs,
        })
    }

    // =========================================================================
    // Typedefs and composite types
    // =========================================================================

    /// Typedef = 'typedef' AttributeList? (Composite | Type) Declarator (',' Declarator)* ';'
    fn parse_typedef(&mut self, mut attrs: AttributeSet, line: u32) -> Option<Vec<Declaration>> {
        self.expect(SyntaxKind::TYPEDEF_KW)?;
        let inner_attrs = self.parse_attributes()?;
        for (name, value) in inner_attrs.iter() {
            attrs.insert(name, value.cloned());
        }

        let composite = if self.at_any(COMPOSITE_KEYWORDS) && self.composite_body_follows() {
            Some(self.parse_composite(attrs.clone(), line)?)
        } else {
            None
        };

        let (base, mut composite) = match composite {
            Some(Some(decl)) => (None, Some(decl)),
            Some(None) => (None, None),
            None => (Some(self.parse_type()?), None),
        };

        let mut declarations = Vec::new();
        let mut primary: Option<Name> = None;
        loop {
            self.skip_decorations();
            let (rank, name, dims) = self.parse_declarator()?;
            let rank = rank + dims.len() as u32;
            match (&mut composite, &base) {
                (Some(decl), _) if rank == 0 && primary.is_none() => {
                    rename_composite(decl, name.clone());
                    primary = Some(name);
                }
                (Some(decl), _) => {
                    let target = primary.clone().unwrap_or_else(|| composite_name(decl));
                    declarations.push(Declaration::Typedef(TypedefDecl {
                        name,
                        alias_of: TypeRef::named(target).with_rank(rank),
                        attrs: AttributeSet::new(),
                        line,
                    }));
                }
                (None, Some(base)) => {
                    let mut alias_of = base.clone();
                    alias_of.array_rank += rank;
                    declarations.push(Declaration::Typedef(TypedefDecl {
                        name,
                        alias_of,
                        attrs: attrs.clone(),
                        line,
                    }));
                }
                (None, None) => {}
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::SEMICOLON)?;

        if let Some(decl) = composite {
            let tag = composite_tag(&decl);
            let name = composite_name(&decl);
            let mut out = vec![decl];
            if let Some(tag) = tag.filter(|tag| *tag != name) {
                out.push(Declaration::Typedef(TypedefDecl {
                    name: tag,
                    alias_of: TypeRef::named(name),
                    attrs: AttributeSet::new(),
                    line,
                }));
            }
            out.append(&mut declarations);
            return Some(out);
        }
        Some(declarations)
    }

    /// `struct {`, `struct tag {`, and `union tag switch (...)` start a body
    fn composite_body_follows(&self) -> bool {
        self.nth(1) == SyntaxKind::L_BRACE
            || (self.nth(1).is_word()
                && matches!(self.nth(2), SyntaxKind::L_BRACE | SyntaxKind::SWITCH_KW))
            || self.nth(1) == SyntaxKind::SWITCH_KW
    }

    /// Composite = ('struct'|'union'|'enum') Name? ('{' ... '}')?
    ///
    /// Returns `None` inside `Some` for a bodiless forward reference.
    fn parse_composite(&mut self, attrs: AttributeSet, line: u32) -> Option<Option<Declaration>> {
        let kind = self.current_kind();
        self.bump();
        let tag = if self.current_kind().is_word() && !self.at(SyntaxKind::SWITCH_KW) {
            self.expect_name()
        } else {
            None
        };
        let has_body = self.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::SWITCH_KW]);
        if !has_body {
            if tag.is_none() {
                self.error_expected(&["{"], ErrorCode::E0303);
                return None;
            }
            return Some(None);
        }
        let name = tag.clone().unwrap_or_else(|| Name::from(format!("__unnamed_{}", line)));
        let decl = match kind {
            SyntaxKind::STRUCT_KW => Declaration::Struct(StructDecl {
                name,
                tag,
                attrs,
                fields: self.parse_struct_body()?,
                line,
            }),
            SyntaxKind::UNION_KW => {
                self.skip_union_body()?;
                Declaration::Union(UnionDecl {
                    name,
                    tag,
                    attrs,
                    line,
                })
            }
            _ => Declaration::Enum(EnumDecl {
                name,
                tag,
                attrs,
                members: self.parse_enum_body()?,
                line,
            }),
        };
        Some(Some(decl))
    }

    /// StructBody = '{' Field* '}'
    fn parse_struct_body(&mut self) -> Option<Vec<FieldDecl>> {
        self.expect(SyntaxKind::L_BRACE)?;
        let mut fields = Vec::new();
        while !self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            if self.eat(SyntaxKind::SEMICOLON) {
                continue;
            }
            let start = self.position();
            match self.parse_field_group() {
                Some(mut group) => fields.append(&mut group),
                None => self.recover_statement(),
            }
            if self.position() == start {
                self.bump();
            }
        }
        self.expect(SyntaxKind::R_BRACE)?;
        Some(fields)
    }

    /// Field = AttributeList? Type Declarator (':' Int)? (',' Declarator)* ';'
    ///
    /// Nested inline composites are accepted and dropped.
    fn parse_field_group(&mut self) -> Option<Vec<FieldDecl>> {
        let line = self.line();
        let attrs = self.parse_attributes()?;
        if self.at_any(COMPOSITE_KEYWORDS) && self.composite_body_follows() {
            tracing::debug!(line, "dropping nested inline type in struct body");
            self.parse_composite(AttributeSet::new(), line)?;
            while !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::EOF]) {
                self.bump();
            }
            self.expect(SyntaxKind::SEMICOLON)?;
            return Some(Vec::new());
        }
        let base = self.parse_type()?;
        let mut fields = Vec::new();
        loop {
            let (rank, name, dims) = self.parse_declarator()?;
            if self.eat(SyntaxKind::COLON) {
                // bit width
                self.parse_expr()?;
            }
            let mut ty = base.clone();
            ty.array_rank += rank;
            fields.push(FieldDecl {
                name,
                ty,
                dims,
                attrs: attrs.clone(),
                line,
            });
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::SEMICOLON)?;
        Some(fields)
    }

    /// A single dispinterface property
    fn parse_field(&mut self) -> Option<FieldDecl> {
        let mut group = self.parse_field_group()?;
        if group.is_empty() {
            self.error_expected(&["property"], ErrorCode::E0304);
            return None;
        }
        Some(group.remove(0))
    }

    /// Union arms are skipped; encapsulated unions carry a `switch (...)` head.
    fn skip_union_body(&mut self) -> Option<()> {
        if self.eat(SyntaxKind::SWITCH_KW) {
            self.skip_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN)?;
            if self.current_kind().is_word() && !self.at(SyntaxKind::SWITCH_KW) {
                self.bump();
            }
        }
        self.skip_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE)
    }

    /// EnumBody = '{' (EnumMember (',' EnumMember)* ','?)? '}'
    fn parse_enum_body(&mut self) -> Option<Vec<EnumMember>> {
        self.expect(SyntaxKind::L_BRACE)?;
        let mut members = Vec::new();
        while !self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            let line = self.line();
            let attrs = self.parse_attributes()?;
            let name = self.expect_name()?;
            let value = if self.eat(SyntaxKind::EQ) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            members.push(EnumMember {
                name,
                value,
                attrs,
                line,
            });
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE)?;
        Some(members)
    }

    // =========================================================================
    // Constants and exceptions
    // =========================================================================

    /// Const = 'const' Type Name '=' ConstExpr ';'
    fn parse_const(&mut self, line: u32) -> Option<Declaration> {
        self.expect(SyntaxKind::CONST_KW)?;
        let ty = self.parse_type()?;
        let name = self.expect_name()?;
        self.expect(SyntaxKind::EQ)?;
        let value = self.parse_expr()?;
        self.expect(SyntaxKind::SEMICOLON)?;
        Some(Declaration::Const(ConstDecl {
            name,
            ty,
            value,
            line,
        }))
    }

    /// Exception = 'exception' Name '{' Field* '}' ';'
    fn parse_exception(&mut self, line: u32) -> Option<Declaration> {
        self.expect(SyntaxKind::EXCEPTION_KW)?;
        let name = self.expect_name()?;
        let fields = self.parse_struct_body()?;
        self.eat(SyntaxKind::SEMICOLON);
        Some(Declaration::Exception(ExceptionDecl { name, fields, line }))
    }
}

fn forward_interface(
    name: Name,
    attrs: AttributeSet,
    is_dispinterface: bool,
    line: u32,
) -> InterfaceDecl {
    InterfaceDecl {
        name,
        attrs,
        bases: Vec::new(),
        members: Vec::new(),
        properties: Vec::new(),
        body: Vec::new(),
        is_forward_decl: true,
        is_dispinterface,
        line,
    }
}

fn composite_name(decl: &Declaration) -> Name {
    match decl {
        Declaration::Struct(d) => d.name.clone(),
        Declaration::Union(d) => d.name.clone(),
        Declaration::Enum(d) => d.name.clone(),
        other => Name::from(other.name().unwrap_or_default()),
    }
}

fn composite_tag(decl: &Declaration) -> Option<Name> {
    match decl {
        Declaration::Struct(d) => d.tag.clone(),
        Declaration::Union(d) => d.tag.clone(),
        Declaration::Enum(d) => d.tag.clone(),
        _ => None,
    }
}

fn rename_composite(decl: &mut Declaration, name: Name) {
    match decl {
        Declaration::Struct(d) => d.name = name,
        Declaration::Union(d) => d.name = name,
        Declaration::Enum(d) => d.name = name,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{Declaration, Expr};
    use crate::parser::errors::ErrorCode;
    use crate::parser::parse;

    #[test]
    fn test_interface_with_base_and_members() {
        let parse = parse(
            "[object, uuid(11111111-2222-3333-4444-555555555555)]
             interface IFoo : IUnknown {
                 [propget] HRESULT Bar([out, retval] int* val);
                 HRESULT Baz([in] BSTR name, [in] long count);
             };",
        );
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Interface(iface) = &parse.tree.declarations[0] else {
            panic!("expected interface");
        };
        assert_eq!(iface.name, "IFoo");
        assert_eq!(iface.bases.len(), 1);
        assert_eq!(iface.bases[0], "IUnknown");
        assert_eq!(iface.members.len(), 2);
        assert!(iface.members[0].attrs.has("propget"));
        assert_eq!(iface.members[0].params[0].ty.to_string(), "int*");
        assert_eq!(iface.members[1].params[1].name, "count");
    }

    #[test]
    fn test_forward_declaration() {
        let parse = parse("interface IFoo; dispinterface DFoo;");
        assert!(parse.ok());
        assert_eq!(parse.tree.declarations.len(), 2);
        for decl in &parse.tree.declarations {
            let Declaration::Interface(iface) = decl else {
                panic!("expected interface");
            };
            assert!(iface.is_forward_decl);
        }
    }

    #[test]
    fn test_library_with_coclass() {
        let parse = parse(
            "[uuid(0A0B0C0D-0000-0000-0000-000000000001)]
             library FooLib {
                 importlib(\"stdole2.tlb\");
                 [uuid(0A0B0C0D-0000-0000-0000-000000000002)]
                 coclass Foo {
                     [default] interface IFoo;
                     [source] dispinterface DFooEvents;
                 };
             };",
        );
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Module(library) = &parse.tree.declarations[0] else {
            panic!("expected library");
        };
        assert!(library.is_library);
        assert_eq!(library.body.len(), 2);
        let Declaration::CoClass(coclass) = &library.body[1] else {
            panic!("expected coclass");
        };
        assert_eq!(coclass.base_interfaces.len(), 2);
        assert!(coclass.base_interfaces[0].attrs.has("default"));
        assert!(coclass.base_interfaces[1].is_dispinterface);
    }

    #[test]
    fn test_dispinterface_sections() {
        let parse = parse(
            "dispinterface DEvents {
                 properties:
                     [id(1)] long Count;
                 methods:
                     [id(2)] void Changed([in] long value);
             };",
        );
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Interface(iface) = &parse.tree.declarations[0] else {
            panic!("expected dispinterface");
        };
        assert!(iface.is_dispinterface);
        assert_eq!(iface.properties.len(), 1);
        assert_eq!(iface.members.len(), 1);
    }

    #[test]
    fn test_typedef_struct_with_tag_and_pointer_declarator() {
        let parse = parse("typedef struct tagPOINT { long x; long y; } POINT, *LPPOINT;");
        assert!(parse.ok(), "{:?}", parse.errors);
        let decls = &parse.tree.declarations;
        assert_eq!(decls.len(), 3);
        let Declaration::Struct(point) = &decls[0] else {
            panic!("expected struct");
        };
        assert_eq!(point.name, "POINT");
        assert_eq!(point.fields.len(), 2);
        let Declaration::Typedef(tag) = &decls[1] else {
            panic!("expected tag alias");
        };
        assert_eq!(tag.name, "tagPOINT");
        let Declaration::Typedef(ptr) = &decls[2] else {
            panic!("expected pointer alias");
        };
        assert_eq!(ptr.name, "LPPOINT");
        assert_eq!(ptr.alias_of.to_string(), "POINT*");
    }

    #[test]
    fn test_typedef_enum_and_encapsulated_union() {
        let parse = parse(
            "typedef [v1_enum] enum { A = 1, B = A << 2, } Flags;
             typedef union _U switch (long kind) u { case 1: long l; default: ; } U;",
        );
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Enum(flags) = &parse.tree.declarations[0] else {
            panic!("expected enum");
        };
        assert_eq!(flags.name, "Flags");
        assert!(flags.attrs.has("v1_enum"));
        assert_eq!(flags.members.len(), 2);
        assert!(matches!(parse.tree.declarations[1], Declaration::Union(_)));
    }

    #[test]
    fn test_module_functions_and_constants() {
        let parse = parse(
            "[dllname(\"user32.dll\")] module Native {
                 const long MAX_PATH = 260;
                 [entry(\"MessageBeep\")] long __stdcall MessageBeep([in] unsigned int type);
             };",
        );
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Module(module) = &parse.tree.declarations[0] else {
            panic!("expected module");
        };
        assert!(!module.is_library);
        assert_eq!(module.body.len(), 1);
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.functions[0].params[0].ty.to_string(), "unsigned int");
    }

    #[test]
    fn test_passthrough_and_imports() {
        let parse = parse(
            "#pragma once\nimport \"oaidl.idl\", \"ocidl.idl\";\ncpp_quote(\"#define X 1\")\nmidl_pragma warning(disable: 2111);",
        );
        assert!(parse.ok(), "{:?}", parse.errors);
        let decls = &parse.tree.declarations;
        assert!(matches!(&decls[0], Declaration::Pragma(p) if p.text == "#pragma once"));
        assert!(matches!(&decls[1], Declaration::Import(i) if i.files.len() == 2));
        assert!(matches!(&decls[2], Declaration::CppQuote(p) if p.text == "#define X 1"));
        assert!(matches!(&decls[3], Declaration::Pragma(p) if p.text == "warning(disable: 2111)"));
    }

    #[test]
    fn test_recovery_continues_after_malformed_declaration() {
        let parse = parse(
            "interface IBad { HRESULT F([in] long a b c); };
             const long GOOD = 5;",
        );
        assert!(!parse.ok());
        assert!(parse
            .tree
            .declarations
            .iter()
            .any(|d| d.name() == Some("GOOD")));
    }

    #[test]
    fn test_missing_semicolon_is_reported() {
        let parse = parse("const long A = 1 const long B = 2;");
        assert_eq!(parse.errors[0].code, ErrorCode::E0201);
        assert_eq!(parse.errors[0].line, 1);
    }

    #[test]
    fn test_cast_versus_parenthesized_expression() {
        let parse = parse("const long A = (long) - 1; const long B = (X) - 1;");
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Const(a) = &parse.tree.declarations[0] else {
            panic!("expected const");
        };
        assert!(matches!(a.value, Expr::Cast(..)));
        let Declaration::Const(b) = &parse.tree.declarations[1] else {
            panic!("expected const");
        };
        assert!(matches!(b.value, Expr::Binary(..)));
    }

    #[test]
    fn test_function_returning_struct_pointer_in_interface() {
        let parse = parse(
            "interface IA {
                 struct tagInner { long a; };
                 struct tagInner* Get(void);
             }",
        );
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Interface(iface) = &parse.tree.declarations[0] else {
            panic!("expected interface");
        };
        assert_eq!(iface.body.len(), 1);
        assert_eq!(iface.members.len(), 1);
        assert_eq!(iface.members[0].return_type.to_string(), "tagInner*");
    }
}
