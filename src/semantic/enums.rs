//! Enum and constant conversion with two-pass identifier resolution
//!
//! Pass one records the owner of every enum member as it is converted. A
//! value naming a member that has not been seen yet is deferred; pass two
//! converts the deferred values once every owner is known. Whatever is
//! still unknown then is emitted as literal text.

use crate::codemodel::{
    BinaryOperator, CodeTypeRef, Expression, Field, Member, Modifiers, Primitive, TypeDecl,
    TypeKind, UnaryOperator,
};
use crate::parser::{BinaryOp, ConstDecl, EnumDecl, Expr, UnaryOp};

use super::builder::ModelBuilder;
use super::model::{TypeInfo, TypeModel};
use super::types::TypeCategory;

/// A value waiting for the fixup pass
#[derive(Debug, Clone, PartialEq)]
pub struct PendingValue {
    /// Namespace entry holding the field
    pub owner: String,
    pub field: String,
    pub expr: Expr,
    pub scope: ValueScope,
}

/// Where a value is converted, which decides identifier qualification and
/// how out-of-range integers are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueScope {
    /// Member of the named enum; values are `int`
    Enum(String),
    /// Constant of the given C# type
    Const(String),
}

impl ValueScope {
    fn is_int(&self) -> bool {
        match self {
            ValueScope::Enum(_) => true,
            ValueScope::Const(ty) => ty == "int",
        }
    }
}

impl ModelBuilder {
    // =========================================================================
    // Enums
    // =========================================================================

    pub(super) fn convert_enum(&mut self, decl: &EnumDecl) {
        let name = decl.name.to_string();
        let mut type_decl = TypeDecl::new(TypeKind::Enum, name.as_str()).with_line(decl.line);
        type_decl.doc = self.doc_for(&name, decl.line, Some(&decl.attrs));
        type_decl.preserve_member_order = true;

        let scope = ValueScope::Enum(name.clone());
        let mut deferred = Vec::new();
        for member in &decl.members {
            let member_name = member.name.to_string();
            match self.model.enum_member_owner.get(&member_name) {
                Some(existing) => {
                    let existing = existing.clone();
                    self.model
                        .diagnostics
                        .duplicate_enum_member(member.line, &member_name, &name, &existing);
                }
                None => {
                    self.model.enum_member_owner.insert(member_name.clone(), name.clone());
                }
            }

            let mut field = Field::new(member_name.as_str(), CodeTypeRef::named("int"));
            field.modifiers = Modifiers::default();
            field.doc = self.doc_for(&member_name, member.line, Some(&member.attrs));
            if let Some(expr) = &member.value {
                match self.convert_value(expr, &scope) {
                    Some(value) => field.initializer = Some(value),
                    None => deferred.push(PendingValue {
                        owner: name.clone(),
                        field: member_name.clone(),
                        expr: expr.clone(),
                        scope: scope.clone(),
                    }),
                }
            }
            type_decl.members.push(Member::Field(field));
        }

        if self.model.insert(TypeModel::new(type_decl, TypeInfo::Enum)) {
            self.pending.extend(deferred);
        }
    }

    // =========================================================================
    // Constants
    // =========================================================================

    pub(super) fn convert_const(&mut self, decl: &ConstDecl) {
        let holder = self
            .current_holder
            .clone()
            .unwrap_or_else(|| self.ctx.options.constants_class.clone());
        self.ensure_holder(&holder, decl.line);

        let ty = self.const_type(decl);
        let scope = ValueScope::Const(ty.name.clone());
        let mut field = Field::new(decl.name.as_str(), ty);
        field.modifiers = Modifiers::public().with_const();
        field.doc = self.doc_for(&decl.name, decl.line, None);
        match self.convert_value(&decl.value, &scope) {
            Some(value) => field.initializer = Some(value),
            None => self.pending.push(PendingValue {
                owner: holder.clone(),
                field: decl.name.to_string(),
                expr: decl.value.clone(),
                scope,
            }),
        }

        if let Some(entry) = self.model.get_mut(&holder) {
            entry.decl.members.push(Member::Field(field));
        }
    }

    fn const_type(&self, decl: &ConstDecl) -> CodeTypeRef {
        if matches!(decl.value, Expr::Str(_)) {
            return CodeTypeRef::named("string");
        }
        let mapped = self.mapper.map(&decl.ty, false);
        match mapped.category {
            TypeCategory::String => CodeTypeRef::named("string"),
            TypeCategory::Value | TypeCategory::Enum if mapped.pointers == 0 => mapped.ty,
            _ if matches!(decl.value, Expr::Float(_)) => CodeTypeRef::named("double"),
            _ => CodeTypeRef::named("int"),
        }
    }

    /// Create the static holder class on first use.
    pub(super) fn ensure_holder(&mut self, holder: &str, line: u32) {
        if self.model.get(holder).is_some() {
            return;
        }
        let mut decl = TypeDecl::new(TypeKind::Class, holder).with_line(line);
        decl.modifiers = Modifiers::public().with_static();
        decl.preserve_member_order = true;
        self.model.insert(TypeModel::new(decl, TypeInfo::Constants));
    }

    // =========================================================================
    // Fixup pass
    // =========================================================================

    pub(super) fn resolve_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "resolving deferred values");
        }
        for value in pending {
            let initializer = match self.convert_value(&value.expr, &value.scope) {
                Some(resolved) => resolved,
                None => {
                    tracing::warn!(
                        owner = %value.owner,
                        field = %value.field,
                        "unresolved identifier in value, emitting literal text"
                    );
                    Expression::snippet(value.expr.to_string())
                }
            };
            let field = self.model.get_mut(&value.owner).and_then(|entry| {
                entry.decl.members.iter_mut().find_map(|m| match m {
                    Member::Field(f) if f.name == value.field && f.initializer.is_none() => Some(f),
                    _ => None,
                })
            });
            if let Some(field) = field {
                field.initializer = Some(initializer);
            }
        }
    }

    // =========================================================================
    // Expression conversion
    // =========================================================================

    /// Convert a constant expression; `None` when an identifier is unknown.
    pub(super) fn convert_value(&self, expr: &Expr, scope: &ValueScope) -> Option<Expression> {
        Some(match expr {
            Expr::Int { value, .. } => self.int_literal(*value, scope),
            Expr::Float(v) => Expression::Primitive(Primitive::Double(*v)),
            Expr::Str(s) => Expression::string(s.clone()),
            Expr::Char(c) => Expression::Primitive(Primitive::Char(*c)),
            Expr::Bool(b) => Expression::bool(*b),
            Expr::Ident(name) => self.resolve_identifier(name, scope)?,
            Expr::Paren(inner) => self.convert_value(inner, scope)?,
            Expr::Unary(UnaryOp::Neg, inner) if int_operand(inner).is_some() => {
                let value = int_operand(inner)?;
                self.negative_literal(value, scope)
            }
            Expr::Unary(op, inner) => Expression::Unary {
                op: match op {
                    UnaryOp::Neg => UnaryOperator::Negate,
                    UnaryOp::Plus => UnaryOperator::Plus,
                    UnaryOp::BitNot => UnaryOperator::BitwiseNot,
                    UnaryOp::Not => UnaryOperator::Not,
                },
                operand: Box::new(self.convert_value(inner, scope)?),
            },
            Expr::Binary(op, lhs, rhs) => Expression::binary(
                binary_operator(*op),
                self.convert_value(lhs, scope)?,
                self.convert_value(rhs, scope)?,
            ),
            Expr::Cast(ty, inner) => {
                let mapped = self.mapper.map(ty, false);
                let target = if mapped.pointers > 0 {
                    CodeTypeRef::named("IntPtr")
                } else {
                    mapped.ty
                };
                Expression::cast(target, self.convert_value(inner, scope)?)
            }
            Expr::SizeOf(ty) => {
                let mapped = self.mapper.map(ty, false);
                Expression::snippet(format!("sizeof({})", mapped.ty))
            }
        })
    }

    fn int_literal(&self, value: u64, scope: &ValueScope) -> Expression {
        if value <= i32::MAX as u64 {
            Expression::int(value as i64)
        } else if scope.is_int() && value <= u32::MAX as u64 {
            Expression::snippet(format!("unchecked((int)0x{:X})", value))
        } else if value <= u32::MAX as u64 {
            Expression::Primitive(Primitive::UInt(value))
        } else if value <= i64::MAX as u64 {
            Expression::Primitive(Primitive::Long(value as i64))
        } else {
            Expression::Primitive(Primitive::ULong(value))
        }
    }

    /// `-value` folded into one literal
    fn negative_literal(&self, value: u64, scope: &ValueScope) -> Expression {
        if value <= 1 << 31 {
            Expression::int(-(value as i64))
        } else if scope.is_int() && value <= u32::MAX as u64 {
            Expression::snippet(format!("unchecked((int)0x{:X})", (value as u32).wrapping_neg()))
        } else if value <= 1 << 63 {
            Expression::Primitive(Primitive::Long((value as i64).wrapping_neg()))
        } else {
            Expression::snippet(format!("unchecked(-{}ul)", value))
        }
    }

    /// Qualify an identifier: `X` in its own enum, `(int)Owner.X` from
    /// elsewhere, `Holder.NAME` for constants. `B.Y` is looked up by `Y`.
    fn resolve_identifier(&self, name: &str, scope: &ValueScope) -> Option<Expression> {
        let member = name.rsplit('.').next().unwrap_or(name);
        if let Some(owner) = self.model.enum_member_owner.get(member) {
            return Some(match scope {
                ValueScope::Enum(current) if current == owner => {
                    Expression::VariableRef(member.to_string())
                }
                _ => Expression::cast(
                    CodeTypeRef::named("int"),
                    Expression::static_field(owner.as_str(), member),
                ),
            });
        }
        if let Some(holder) = self.model.constants.get(member) {
            return Some(Expression::static_field(holder.as_str(), member));
        }
        None
    }
}

/// Integer literal under any number of parentheses
fn int_operand(expr: &Expr) -> Option<u64> {
    match expr {
        Expr::Int { value, .. } => Some(*value),
        Expr::Paren(inner) => int_operand(inner),
        _ => None,
    }
}

fn binary_operator(op: BinaryOp) -> BinaryOperator {
    match op {
        BinaryOp::BitOr => BinaryOperator::BitwiseOr,
        BinaryOp::BitXor => BinaryOperator::BitwiseXor,
        BinaryOp::BitAnd => BinaryOperator::BitwiseAnd,
        BinaryOp::Shl => BinaryOperator::ShiftLeft,
        BinaryOp::Shr => BinaryOperator::ShiftRight,
        BinaryOp::Add => BinaryOperator::Add,
        BinaryOp::Sub => BinaryOperator::Subtract,
        BinaryOp::Mul => BinaryOperator::Multiply,
        BinaryOp::Div => BinaryOperator::Divide,
        BinaryOp::Mod => BinaryOperator::Modulus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::semantic::diagnostics::codes;
    use crate::semantic::model::ProgramModel;
    use crate::semantic::options::BuildContext;

    fn build(source: &str) -> ProgramModel {
        let parse = parse(source);
        assert!(parse.ok(), "{:?}", parse.errors);
        ModelBuilder::new(BuildContext::default()).build(&parse.tree)
    }

    fn value(model: &ProgramModel, owner: &str, field: &str) -> Option<Expression> {
        match model.get(owner)?.decl.member(field)? {
            Member::Field(f) => f.initializer.clone(),
            _ => None,
        }
    }

    #[test]
    fn test_same_enum_reference_is_unqualified() {
        let model = build("enum E { A = 1, B = A << 1 };");
        assert_eq!(
            value(&model, "E", "B"),
            Some(Expression::binary(
                BinaryOperator::ShiftLeft,
                Expression::VariableRef("A".into()),
                Expression::int(1)
            ))
        );
    }

    #[test]
    fn test_forward_reference_resolves_in_fixup() {
        let model = build("enum A { X = B.Y }; enum B { Y = 5 };");
        assert!(model.diagnostics.is_empty());
        assert_eq!(
            value(&model, "A", "X"),
            Some(Expression::cast(
                CodeTypeRef::named("int"),
                Expression::static_field("B", "Y")
            ))
        );
    }

    #[test]
    fn test_unknown_reference_becomes_literal_text() {
        let model = build("enum A { X = NOWHERE | 1 };");
        assert_eq!(value(&model, "A", "X"), Some(Expression::snippet("NOWHERE | 1")));
    }

    #[test]
    fn test_duplicate_member_reports_and_keeps_first_owner() {
        let model = build("enum A { X = 1 }; enum B { X = 2 };");
        assert_eq!(model.diagnostics.with_code(codes::DUPLICATE_ENUM_MEMBER).len(), 1);
        assert_eq!(model.enum_member_owner.get("X").map(String::as_str), Some("A"));
        assert!(model.get("B").unwrap().decl.member("X").is_some());
    }

    #[test]
    fn test_large_values_are_unchecked() {
        let model = build("enum E { High = 0x80000000 };");
        assert_eq!(
            value(&model, "E", "High"),
            Some(Expression::snippet("unchecked((int)0x80000000)"))
        );
    }

    #[test]
    fn test_constants_go_to_holder_class() {
        let model = build(
            "const long MAX_ITEMS = 16; const char* NAME = \"acme\"; enum E { Limit = MAX_ITEMS };",
        );
        let holder = &model.get("Constants").unwrap().decl;
        assert!(holder.modifiers.is_static);
        let Member::Field(max) = holder.member("MAX_ITEMS").unwrap() else {
            panic!("expected field");
        };
        assert!(max.modifiers.is_const);
        assert_eq!(max.ty.name, "int");
        let Member::Field(name) = holder.member("NAME").unwrap() else {
            panic!("expected field");
        };
        assert_eq!(name.ty.name, "string");
        assert_eq!(
            value(&model, "E", "Limit"),
            Some(Expression::static_field("Constants", "MAX_ITEMS"))
        );
    }

    #[test]
    fn test_negated_literals_are_folded() {
        let model = build("enum E { A = -(0x80000000), B = -(-1), C = -0xFFFFFFFF };");
        assert_eq!(value(&model, "E", "A"), Some(Expression::int(-2147483648)));
        assert_eq!(
            value(&model, "E", "B"),
            Some(Expression::Unary {
                op: UnaryOperator::Negate,
                operand: Box::new(Expression::int(-1)),
            })
        );
        assert_eq!(value(&model, "E", "C"), Some(Expression::snippet("unchecked((int)0x1)")));
    }

    #[test]
    fn test_module_constants_use_module_holder() {
        let model = build("module Limits { const long MAX = 3; };");
        assert!(model.get("Limits").unwrap().decl.member("MAX").is_some());
        assert!(model.get("Constants").is_none());
    }
}
