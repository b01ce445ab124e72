//! Declaration tree produced by the IDL parser.
//!
//! Every node is a plain owned value; nothing here is resolved. Names are
//! kept exactly as written (apart from multi-word primitive normalization),
//! and constant expressions are kept as trees so the semantic pass can decide
//! how each identifier resolves.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// Identifier text
pub type Name = SmolStr;

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Value of a bracketed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Single argument, string literals unquoted: `uuid(...)`, `size_is(n)`
    Scalar(String),
    /// Several comma separated arguments: `size_is(, *pcb)`
    Args(Vec<String>),
    /// `custom(name, value)`
    Named { name: String, value: String },
}

impl AttrValue {
    /// The scalar text, or the first non-empty argument of a list
    pub fn first(&self) -> Option<&str> {
        match self {
            AttrValue::Scalar(s) => Some(s.as_str()),
            AttrValue::Args(args) => args.iter().map(String::as_str).find(|a| !a.is_empty()),
            AttrValue::Named { value, .. } => Some(value.as_str()),
        }
    }
}

/// Ordered attribute list: `[uuid(...), object, pointer_default(unique)]`
///
/// Keys are lower-cased. `custom(name, value)` entries are keyed
/// `custom:<name>` so several can coexist. The first occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: IndexMap<String, Option<AttrValue>>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute; returns false if the key was already present.
    pub fn insert(&mut self, name: &str, value: Option<AttrValue>) -> bool {
        let key = match &value {
            Some(AttrValue::Named { name: custom, .. }) if name.eq_ignore_ascii_case("custom") => {
                format!("custom:{}", custom.to_ascii_lowercase())
            }
            _ => name.to_ascii_lowercase(),
        };
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Builder-style insert for flag attributes
    pub fn with_flag(mut self, name: &str) -> Self {
        self.insert(name, None);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .and_then(|value| value.as_ref())
    }

    /// First argument of an attribute, if it has one
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::first)
    }

    /// Value of `custom(name, value)` looked up by `name`
    pub fn custom(&self, name: &str) -> Option<&str> {
        match self.entries.get(&format!("custom:{}", name.to_ascii_lowercase())) {
            Some(Some(AttrValue::Named { value, .. })) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn has_custom(&self, name: &str) -> bool {
        self.entries
            .contains_key(&format!("custom:{}", name.to_ascii_lowercase()))
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<AttrValue>> {
        self.entries.shift_remove(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&AttrValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// A type as written in IDL
///
/// Pointer depth and `[]` array dimensions are folded into `array_rank`;
/// qualified names are dot-joined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub base_name: Name,
    pub array_rank: u32,
    pub type_arguments: Vec<TypeRef>,
}

impl TypeRef {
    pub fn named(name: impl Into<Name>) -> Self {
        Self {
            base_name: name.into(),
            array_rank: 0,
            type_arguments: Vec::new(),
        }
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.array_rank = rank;
        self
    }

    pub fn is_void(&self) -> bool {
        self.base_name == "void" && self.array_rank == 0
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base_name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(")")?;
        }
        for _ in 0..self.array_rank {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// One `[n]` declarator suffix; `None` for `[]` or `[*]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDim {
    pub size: Option<Expr>,
}

// ============================================================================
// CONSTANT EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    BitNot,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// Arithmetic constant expression used for enum values, constants and sizes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal; `text` keeps the original spelling
    Int { value: u64, text: String, unsigned: bool, long: bool },
    Float(f64),
    /// String literal, unescaped
    Str(String),
    /// Character literal, unescaped
    Char(char),
    Bool(bool),
    /// Identifier, possibly dot-qualified (`B.Y`)
    Ident(Name),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Paren(Box<Expr>),
    Cast(TypeRef, Box<Expr>),
    SizeOf(TypeRef),
}

impl Expr {
    pub fn int(value: u64) -> Self {
        Expr::Int {
            value,
            text: value.to_string(),
            unsigned: false,
            long: false,
        }
    }

    /// Evaluate the expression as a signed integer.
    ///
    /// `lookup` resolves identifiers; unresolved identifiers, strings and
    /// floats make the whole expression non-constant.
    pub fn evaluate(&self, lookup: &dyn Fn(&str) -> Option<i64>) -> Option<i64> {
        match self {
            Expr::Int { value, .. } => Some(*value as i64),
            Expr::Char(c) => Some(*c as i64),
            Expr::Bool(b) => Some(i64::from(*b)),
            Expr::Float(_) | Expr::Str(_) | Expr::SizeOf(_) => None,
            Expr::Ident(name) => lookup(name),
            Expr::Paren(inner) | Expr::Cast(_, inner) => inner.evaluate(lookup),
            Expr::Unary(op, inner) => {
                let v = inner.evaluate(lookup)?;
                Some(match op {
                    UnaryOp::Neg => v.wrapping_neg(),
                    UnaryOp::Plus => v,
                    UnaryOp::BitNot => !v,
                    UnaryOp::Not => i64::from(v == 0),
                })
            }
            Expr::Binary(op, lhs, rhs) => {
                let l = lhs.evaluate(lookup)?;
                let r = rhs.evaluate(lookup)?;
                match op {
                    BinaryOp::BitOr => Some(l | r),
                    BinaryOp::BitXor => Some(l ^ r),
                    BinaryOp::BitAnd => Some(l & r),
                    BinaryOp::Shl => Some(l.wrapping_shl(r as u32)),
                    BinaryOp::Shr => Some(l.wrapping_shr(r as u32)),
                    BinaryOp::Add => Some(l.wrapping_add(r)),
                    BinaryOp::Sub => Some(l.wrapping_sub(r)),
                    BinaryOp::Mul => Some(l.wrapping_mul(r)),
                    BinaryOp::Div => l.checked_div(r),
                    BinaryOp::Mod => l.checked_rem(r),
                }
            }
        }
    }

    /// Every identifier referenced by the expression, in source order
    pub fn identifiers(&self) -> Vec<&Name> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Expr::Ident(name) => out.push(name),
            Expr::Unary(_, inner) | Expr::Paren(inner) | Expr::Cast(_, inner) => {
                inner.collect_identifiers(out)
            }
            Expr::Binary(_, lhs, rhs) => {
                lhs.collect_identifiers(out);
                rhs.collect_identifiers(out);
            }
            Expr::Int { .. }
            | Expr::Float(_)
            | Expr::Str(_)
            | Expr::Char(_)
            | Expr::Bool(_)
            | Expr::SizeOf(_) => {}
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Int { text, .. } => f.write_str(text),
            Expr::Float(v) => write!(f, "{:?}", v),
            Expr::Str(s) => {
                f.write_str("\"")?;
                s.chars().try_for_each(|c| write_escaped(f, c, '"'))?;
                f.write_str("\"")
            }
            Expr::Char(c) => {
                f.write_str("'")?;
                write_escaped(f, *c, '\'')?;
                f.write_str("'")
            }
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Ident(name) => f.write_str(name),
            Expr::Unary(op, inner) => {
                let sym = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Plus => "+",
                    UnaryOp::BitNot => "~",
                    UnaryOp::Not => "!",
                };
                write!(f, "{}{}", sym, inner)
            }
            Expr::Binary(op, lhs, rhs) => write!(f, "{} {} {}", lhs, op.as_str(), rhs),
            Expr::Paren(inner) => write!(f, "({})", inner),
            Expr::Cast(ty, inner) => write!(f, "({}){}", ty, inner),
            Expr::SizeOf(ty) => write!(f, "sizeof({})", ty),
        }
    }
}

/// C escapes, which read the same in C#
fn write_escaped(f: &mut std::fmt::Formatter<'_>, c: char, quote: char) -> std::fmt::Result {
    match c {
        '\\' => f.write_str("\\\\"),
        '\t' => f.write_str("\\t"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\0' => f.write_str("\\0"),
        c if c == quote => write!(f, "\\{}", c),
        c => write!(f, "{}", c),
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A parsed compilation unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationTree {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Module(ModuleDecl),
    Interface(InterfaceDecl),
    CoClass(CoClassDecl),
    Struct(StructDecl),
    Union(UnionDecl),
    Enum(EnumDecl),
    Typedef(TypedefDecl),
    Const(ConstDecl),
    Exception(ExceptionDecl),
    Import(ImportDecl),
    ImportLib(ImportLibDecl),
    CppQuote(Passthrough),
    Pragma(Passthrough),
}

impl Declaration {
    /// Declared name; passthrough and import declarations have none
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Module(d) => Some(&d.name),
            Declaration::Interface(d) => Some(&d.name),
            Declaration::CoClass(d) => Some(&d.name),
            Declaration::Struct(d) => Some(&d.name),
            Declaration::Union(d) => Some(&d.name),
            Declaration::Enum(d) => Some(&d.name),
            Declaration::Typedef(d) => Some(&d.name),
            Declaration::Const(d) => Some(&d.name),
            Declaration::Exception(d) => Some(&d.name),
            Declaration::Import(_)
            | Declaration::ImportLib(_)
            | Declaration::CppQuote(_)
            | Declaration::Pragma(_) => None,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Declaration::Module(d) => d.line,
            Declaration::Interface(d) => d.line,
            Declaration::CoClass(d) => d.line,
            Declaration::Struct(d) => d.line,
            Declaration::Union(d) => d.line,
            Declaration::Enum(d) => d.line,
            Declaration::Typedef(d) => d.line,
            Declaration::Const(d) => d.line,
            Declaration::Exception(d) => d.line,
            Declaration::Import(d) => d.line,
            Declaration::ImportLib(d) => d.line,
            Declaration::CppQuote(d) | Declaration::Pragma(d) => d.line,
        }
    }
}

/// `library Name { ... }` or `module Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub name: Name,
    pub attrs: AttributeSet,
    pub body: Vec<Declaration>,
    /// Function entry points declared directly in a `module`
    pub functions: Vec<FunctionProto>,
    pub is_library: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: Name,
    pub attrs: AttributeSet,
    pub bases: Vec<Name>,
    pub members: Vec<FunctionProto>,
    /// `properties:` section of a dispinterface
    pub properties: Vec<FieldDecl>,
    /// Typedefs, constants and other declarations nested in the body
    pub body: Vec<Declaration>,
    pub is_forward_decl: bool,
    pub is_dispinterface: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoClassBase {
    pub name: Name,
    pub attrs: AttributeSet,
    pub is_dispinterface: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoClassDecl {
    pub name: Name,
    pub attrs: AttributeSet,
    pub base_interfaces: Vec<CoClassBase>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: TypeRef,
    pub dims: Vec<ArrayDim>,
    pub attrs: AttributeSet,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: Name,
    /// Tag name when declared through `typedef struct tag { } Name;`
    pub tag: Option<Name>,
    pub attrs: AttributeSet,
    pub fields: Vec<FieldDecl>,
    pub line: u32,
}

/// Unions are accepted syntactically; their arms are not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDecl {
    pub name: Name,
    pub tag: Option<Name>,
    pub attrs: AttributeSet,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: Name,
    pub value: Option<Expr>,
    pub attrs: AttributeSet,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: Name,
    pub tag: Option<Name>,
    pub attrs: AttributeSet,
    pub members: Vec<EnumMember>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedefDecl {
    pub name: Name,
    pub alias_of: TypeRef,
    pub attrs: AttributeSet,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Name,
    pub ty: TypeRef,
    pub value: Expr,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionDecl {
    pub name: Name,
    pub fields: Vec<FieldDecl>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub files: Vec<String>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportLibDecl {
    pub file: String,
    pub line: u32,
}

/// `cpp_quote`, `midl_pragma` and preprocessor lines, kept verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct Passthrough {
    pub text: String,
    pub line: u32,
}

/// A method or function prototype
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionProto {
    pub name: Name,
    pub return_type: TypeRef,
    pub params: Vec<Param>,
    pub attrs: AttributeSet,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Name,
    pub ty: TypeRef,
    pub dims: Vec<ArrayDim>,
    pub attrs: AttributeSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_set_first_wins() {
        let mut attrs = AttributeSet::new();
        assert!(attrs.insert("UUID", Some(AttrValue::Scalar("a".into()))));
        assert!(!attrs.insert("uuid", Some(AttrValue::Scalar("b".into()))));
        assert_eq!(attrs.scalar("uuid"), Some("a"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_attribute_set_custom_entries_coexist() {
        let mut attrs = AttributeSet::new();
        attrs.insert(
            "custom",
            Some(AttrValue::Named { name: "PreserveSig".into(), value: "1".into() }),
        );
        attrs.insert(
            "custom",
            Some(AttrValue::Named { name: "Other".into(), value: "x".into() }),
        );
        assert!(attrs.has_custom("preservesig"));
        assert_eq!(attrs.custom("other"), Some("x"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_attr_value_first_skips_empty_args() {
        let value = AttrValue::Args(vec![String::new(), "*pcb".into()]);
        assert_eq!(value.first(), Some("*pcb"));
    }

    #[test]
    fn test_expr_evaluate() {
        let expr = Expr::Binary(
            BinaryOp::BitOr,
            Box::new(Expr::Binary(BinaryOp::Shl, Box::new(Expr::int(1)), Box::new(Expr::int(4)))),
            Box::new(Expr::Ident("X".into())),
        );
        let lookup = |name: &str| if name == "X" { Some(3) } else { None };
        assert_eq!(expr.evaluate(&lookup), Some(19));
        assert_eq!(expr.evaluate(&|_: &str| None), None);
        assert_eq!(expr.identifiers(), vec![&Name::from("X")]);
    }

    #[test]
    fn test_literal_display_uses_c_escapes() {
        let text = Expr::Str("é\"\n".into()).to_string();
        assert_eq!(text, "\"é\\\"\\n\"");
        assert_eq!(Expr::Char('\'').to_string(), "'\\''");
    }

    #[test]
    fn test_type_ref_display() {
        let ty = TypeRef {
            base_name: "SAFEARRAY".into(),
            array_rank: 1,
            type_arguments: vec![TypeRef::named("BSTR")],
        };
        assert_eq!(ty.to_string(), "SAFEARRAY(BSTR)*");
    }
}
