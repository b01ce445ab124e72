//! Expression rendering

use crate::codemodel::{BinaryOperator, CodeTypeRef, Direction, Expression, Primitive};

use super::identifiers::{escape_identifier, escape_type_name};
use super::literals::{quote_string, render_primitive};
use super::{Emitter, ModelInvariantViolation, Result};

/// Extra indent levels for the right operand of a nested binary expression
const BINARY_CONTINUATION_INDENT: usize = 3;

impl Emitter<'_> {
    pub(super) fn expression(&mut self, expr: &Expression) -> Result {
        match expr {
            Expression::Primitive(Primitive::Str(value)) => self.string_literal(value),
            Expression::Primitive(value) => self.w.write(&render_primitive(value)),
            Expression::Binary { op, left, right } => self.binary(*op, left, right, true)?,
            Expression::Unary { op, operand } => {
                self.w.write(op.as_str());
                if needs_unary_parens(operand) {
                    self.w.write("(");
                    self.expression(operand)?;
                    self.w.write(")");
                } else {
                    self.expression(operand)?;
                }
            }
            Expression::Cast { ty, expr } => {
                self.w.write("((");
                self.type_ref(ty)?;
                self.w.write(")(");
                self.expression(expr)?;
                self.w.write("))");
            }
            Expression::FieldRef { target, name } | Expression::PropertyRef { target, name } => {
                if let Some(target) = target {
                    self.expression(target)?;
                    self.w.write(".");
                }
                let name = self.identifier(name, "member reference")?;
                self.w.write(&name);
            }
            Expression::VariableRef(name) | Expression::ArgumentRef(name) => {
                let name = self.identifier(name, "variable reference")?;
                self.w.write(&name);
            }
            Expression::MethodInvoke {
                target,
                method,
                type_arguments,
                args,
            } => {
                if let Some(target) = target {
                    self.expression(target)?;
                    self.w.write(".");
                }
                let method = self.identifier(method, "method reference")?;
                self.w.write(&method);
                if !type_arguments.is_empty() {
                    self.w.write("<");
                    for (i, arg) in type_arguments.iter().enumerate() {
                        if i > 0 {
                            self.w.write(", ");
                        }
                        self.type_ref(arg)?;
                    }
                    self.w.write(">");
                }
                self.arguments("(", args, ")")?;
            }
            Expression::DelegateInvoke { target, args } => {
                self.expression(target)?;
                self.arguments("(", args, ")")?;
            }
            Expression::ObjectCreate { ty, args } => {
                self.w.write("new ");
                self.type_ref(ty)?;
                self.arguments("(", args, ")")?;
            }
            Expression::ArrayCreate {
                element_type,
                size,
                initializers,
            } => {
                self.w.write("new ");
                self.type_ref(element_type)?;
                if initializers.is_empty() {
                    self.w.write("[");
                    match size {
                        Some(size) => self.expression(size)?,
                        None => self.w.write("0"),
                    }
                    self.w.write("]");
                } else {
                    self.w.write("[] ");
                    self.arguments("{ ", initializers, " }")?;
                }
            }
            Expression::ArrayIndexer { target, indices } | Expression::Indexer { target, indices } => {
                self.expression(target)?;
                self.arguments("[", indices, "]")?;
            }
            Expression::TypeOf(ty) => {
                self.w.write("typeof(");
                self.type_ref(ty)?;
                self.w.write(")");
            }
            Expression::TypeRef(ty) => self.type_ref(ty)?,
            Expression::DefaultValue(ty) => {
                self.w.write("default(");
                self.type_ref(ty)?;
                self.w.write(")");
            }
            Expression::This => self.w.write("this"),
            Expression::Base => self.w.write("base"),
            Expression::Direction { direction, expr } => {
                if let Some(keyword) = direction.keyword() {
                    self.w.write(keyword);
                    self.w.write(" ");
                }
                self.expression(expr)?;
            }
            Expression::Snippet(text) => self.w.write(text),
        }
        Ok(())
    }

    /// An `if`/`while` test: a binary expression loses its outer parentheses.
    pub(super) fn condition(&mut self, expr: &Expression) -> Result {
        match expr {
            Expression::Binary { op, left, right } => self.binary(*op, left, right, false),
            other => self.expression(other),
        }
    }

    /// `(left op right)`.
    ///
    /// When either operand is itself binary, the right operand moves to a new
    /// line indented three levels deeper. Only the outermost such expression
    /// adds the indent.
    fn binary(
        &mut self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
        parenthesize: bool,
    ) -> Result {
        if parenthesize {
            self.w.write("(");
        }
        self.expression(left)?;
        self.w.write(" ");
        self.w.write(op.as_str());

        let nested = left.is_binary() || right.is_binary();
        let saved_level = self.w.indent_level();
        let entered = nested && !self.in_nested_binary;
        if entered {
            self.in_nested_binary = true;
            self.w.set_indent_level(saved_level + BINARY_CONTINUATION_INDENT);
        }
        if nested {
            self.w.newline();
        } else {
            self.w.write(" ");
        }
        self.expression(right)?;
        if entered {
            self.w.set_indent_level(saved_level);
            self.in_nested_binary = false;
        }

        if parenthesize {
            self.w.write(")");
        }
        Ok(())
    }

    /// String literal; long escaped strings continue one level deeper.
    fn string_literal(&mut self, value: &str) {
        let pieces = quote_string(value);
        let saved_level = self.w.indent_level();
        for (i, piece) in pieces.iter().enumerate() {
            if i == 1 {
                self.w.set_indent_level(saved_level + 1);
            }
            if i > 0 {
                self.w.write(" +");
                self.w.newline();
            }
            self.w.write(piece);
        }
        self.w.set_indent_level(saved_level);
    }

    fn arguments(&mut self, open: &str, args: &[Expression], close: &str) -> Result {
        self.w.write(open);
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.w.write(", ");
            }
            self.expression(arg)?;
        }
        self.w.write(close);
        Ok(())
    }

    pub(super) fn type_ref(&mut self, ty: &CodeTypeRef) -> Result {
        let text = self.type_name(ty)?;
        self.w.write(&text);
        Ok(())
    }

    pub(super) fn type_name(&self, ty: &CodeTypeRef) -> Result<String> {
        if ty.name.is_empty() {
            return Err(ModelInvariantViolation::empty_type_name(self.owner.clone()));
        }
        let mut out = escape_type_name(&ty.name);
        if !ty.type_arguments.is_empty() {
            let args = ty
                .type_arguments
                .iter()
                .map(|arg| self.type_name(arg))
                .collect::<Result<Vec<_>>>()?;
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        for _ in 0..ty.array_rank {
            out.push_str("[]");
        }
        Ok(out)
    }

    pub(super) fn identifier(&self, name: &str, kind: &'static str) -> Result<String> {
        if name.is_empty() {
            return Err(ModelInvariantViolation::empty_identifier(kind, self.owner.clone()));
        }
        Ok(escape_identifier(name))
    }

    pub(super) fn direction_prefix(&mut self, direction: Direction) {
        if let Some(keyword) = direction.keyword() {
            self.w.write(keyword);
            self.w.write(" ");
        }
    }
}

/// Operands that would otherwise start with a sign, as in `--1`
fn needs_unary_parens(operand: &Expression) -> bool {
    match operand {
        Expression::Unary { .. } => true,
        Expression::Primitive(Primitive::Int(n) | Primitive::Long(n)) => *n < 0,
        Expression::Primitive(Primitive::Float(f)) => f.is_sign_negative(),
        Expression::Primitive(Primitive::Double(d)) => d.is_sign_negative(),
        Expression::Snippet(text) => text.starts_with(['-', '+']),
        _ => false,
    }
}
