//! Type declarations, type references, modifiers and attributes

use super::expressions::Expression;
use super::members::{Member, Parameter};

// ============================================================================
// TYPE REFERENCES
// ============================================================================

/// Reference to a type by its target-language spelling
///
/// Cross references are by name only; the emitter never resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeTypeRef {
    pub name: String,
    /// Number of `[]` suffixes
    pub array_rank: u32,
    pub type_arguments: Vec<CodeTypeRef>,
}

impl CodeTypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            array_rank: 0,
            type_arguments: Vec::new(),
        }
    }

    pub fn void() -> Self {
        Self::named("void")
    }

    pub fn is_void(&self) -> bool {
        self.name == "void" && self.array_rank == 0
    }

    /// One more array dimension
    pub fn array(mut self) -> Self {
        self.array_rank += 1;
        self
    }

    pub fn with_type_argument(mut self, arg: CodeTypeRef) -> Self {
        self.type_arguments.push(arg);
        self
    }
}

impl std::fmt::Display for CodeTypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_rank {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Internal,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// Declaration modifiers; `visibility: None` renders no access keyword,
/// which is what interface members need.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub visibility: Option<Visibility>,
    /// Hides an inherited member (`new`)
    pub is_new: bool,
    pub is_static: bool,
    pub is_const: bool,
    pub is_readonly: bool,
    pub is_extern: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_sealed: bool,
    pub is_partial: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self {
            visibility: Some(Visibility::Public),
            ..Self::default()
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_extern(mut self) -> Self {
        self.is_extern = true;
        self
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_new(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// Keywords in declaration order
    pub fn keywords(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(visibility) = self.visibility {
            out.push(visibility.as_str());
        }
        let flags = [
            (self.is_new, "new"),
            (self.is_static, "static"),
            (self.is_const, "const"),
            (self.is_readonly, "readonly"),
            (self.is_abstract, "abstract"),
            (self.is_virtual, "virtual"),
            (self.is_override, "override"),
            (self.is_sealed, "sealed"),
            (self.is_extern, "extern"),
            (self.is_partial, "partial"),
        ];
        out.extend(flags.iter().filter(|(set, _)| *set).map(|(_, kw)| *kw));
        out
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Where an attribute applies when it is not the declaration itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeTarget {
    Return,
    Param,
    Assembly,
}

impl AttributeTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeTarget::Return => "return",
            AttributeTarget::Param => "param",
            AttributeTarget::Assembly => "assembly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArg {
    /// `Name = value` when set, positional otherwise
    pub name: Option<String>,
    pub value: Expression,
}

/// `[Name(args)]` attached to a type, member, parameter or return value
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDecl {
    pub name: String,
    pub args: Vec<AttributeArg>,
    pub target: Option<AttributeTarget>,
}

impl AttributeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            target: None,
        }
    }

    pub fn with_arg(mut self, value: Expression) -> Self {
        self.args.push(AttributeArg { name: None, value });
        self
    }

    pub fn with_named_arg(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.args.push(AttributeArg {
            name: Some(name.into()),
            value,
        });
        self
    }

    pub fn with_target(mut self, target: AttributeTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

// ============================================================================
// TYPE DECLARATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        }
    }
}

/// Signature of a delegate type
#[derive(Debug, Clone, PartialEq)]
pub struct DelegateSignature {
    pub return_type: CodeTypeRef,
    pub parameters: Vec<Parameter>,
}

/// A type declaration in the code model
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub base_types: Vec<CodeTypeRef>,
    pub type_parameters: Vec<String>,
    pub members: Vec<Member>,
    pub attrs: Vec<AttributeDecl>,
    pub modifiers: Modifiers,
    /// Documentation text spliced verbatim above the declaration
    pub doc: Option<String>,
    /// Line comments emitted above the declaration (`NOTE:` annotations)
    pub comments: Vec<String>,
    /// Source line of the declaration this type was built from
    pub line: u32,
    /// Emit members in declaration order (COM vtable layout)
    pub preserve_member_order: bool,
    /// Only set for `TypeKind::Delegate`
    pub signature: Option<DelegateSignature>,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            base_types: Vec::new(),
            type_parameters: Vec::new(),
            members: Vec::new(),
            attrs: Vec::new(),
            modifiers: Modifiers::public(),
            doc: None,
            comments: Vec::new(),
            line: 0,
            preserve_member_order: false,
            signature: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttributeDecl> {
        self.attrs.iter().find(|a| a.is(name))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Replace any attribute with the same name, keeping its position.
    pub fn set_attr(&mut self, attr: AttributeDecl) {
        match self.attrs.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => *existing = attr,
            None => self.attrs.push(attr),
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_type_ref_display() {
        let ty = CodeTypeRef::named("List").with_type_argument(CodeTypeRef::named("int")).array();
        assert_eq!(ty.to_string(), "List<int>[]");
    }

    #[test]
    fn test_modifier_keyword_order() {
        let modifiers = Modifiers::public().with_static().with_extern().with_new();
        assert_eq!(modifiers.keywords(), vec!["public", "new", "static", "extern"]);
        assert!(Modifiers::default().keywords().is_empty());
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut ty = TypeDecl::new(TypeKind::Interface, "IFoo");
        ty.attrs.push(AttributeDecl::new("ComImport"));
        ty.attrs.push(AttributeDecl::new("Guid").with_arg(Expression::string("a")));
        ty.set_attr(AttributeDecl::new("Guid").with_arg(Expression::string("b")));
        assert_eq!(ty.attrs.len(), 2);
        assert_eq!(ty.attrs[1].args[0].value, Expression::string("b"));
    }
}
