//! Expression nodes

use super::members::Direction;
use super::types::CodeTypeRef;

/// Literal values; the variant decides the rendered suffix
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Char(char),
    Str(String),
    /// 32-bit and narrower signed integers
    Int(i64),
    /// 64-bit signed integer (`L`)
    Long(i64),
    /// 32-bit unsigned integer (`u`)
    UInt(u64),
    /// 64-bit unsigned integer (`ul`)
    ULong(u64),
    Float(f32),
    Double(f64),
    /// Fixed-point decimal, kept as its source digits (`m`)
    Decimal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Assign,
    IdentityEquality,
    IdentityInequality,
    ValueEquality,
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
    BooleanOr,
    BooleanAnd,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    ShiftLeft,
    ShiftRight,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulus => "%",
            BinaryOperator::Assign => "=",
            BinaryOperator::IdentityEquality | BinaryOperator::ValueEquality => "==",
            BinaryOperator::IdentityInequality => "!=",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BooleanOr => "||",
            BinaryOperator::BooleanAnd => "&&",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Plus,
    BitwiseNot,
    Not,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Not => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Primitive(Primitive),
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Cast {
        ty: CodeTypeRef,
        expr: Box<Expression>,
    },
    FieldRef {
        target: Option<Box<Expression>>,
        name: String,
    },
    PropertyRef {
        target: Option<Box<Expression>>,
        name: String,
    },
    VariableRef(String),
    ArgumentRef(String),
    MethodInvoke {
        target: Option<Box<Expression>>,
        method: String,
        type_arguments: Vec<CodeTypeRef>,
        args: Vec<Expression>,
    },
    DelegateInvoke {
        target: Box<Expression>,
        args: Vec<Expression>,
    },
    ObjectCreate {
        ty: CodeTypeRef,
        args: Vec<Expression>,
    },
    ArrayCreate {
        element_type: CodeTypeRef,
        size: Option<Box<Expression>>,
        initializers: Vec<Expression>,
    },
    ArrayIndexer {
        target: Box<Expression>,
        indices: Vec<Expression>,
    },
    Indexer {
        target: Box<Expression>,
        indices: Vec<Expression>,
    },
    TypeOf(CodeTypeRef),
    TypeRef(CodeTypeRef),
    DefaultValue(CodeTypeRef),
    This,
    Base,
    /// `out x` / `ref x` argument
    Direction {
        direction: Direction,
        expr: Box<Expression>,
    },
    /// Raw target-language text
    Snippet(String),
}

impl Expression {
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Primitive(Primitive::Str(value.into()))
    }

    pub fn int(value: i64) -> Self {
        Expression::Primitive(Primitive::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Expression::Primitive(Primitive::Bool(value))
    }

    pub fn null() -> Self {
        Expression::Primitive(Primitive::Null)
    }

    pub fn snippet(text: impl Into<String>) -> Self {
        Expression::Snippet(text.into())
    }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn cast(ty: CodeTypeRef, expr: Expression) -> Self {
        Expression::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    /// `Type.Member` as a static field reference
    pub fn static_field(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Expression::FieldRef {
            target: Some(Box::new(Expression::TypeRef(CodeTypeRef::named(ty)))),
            name: name.into(),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Expression::Binary { .. })
    }
}
