//! Type members and parameters

use super::expressions::Expression;
use super::statements::Statement;
use super::types::{AttributeDecl, CodeTypeRef, Modifiers, TypeDecl};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    In,
    Out,
    Ref,
}

impl Direction {
    /// Keyword prefix for parameters and arguments; empty for `In`
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Direction::In => None,
            Direction::Out => Some("out"),
            Direction::Ref => Some("ref"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: CodeTypeRef,
    pub direction: Direction,
    /// Sibling parameter or constant giving the element count
    pub size_is_ref: Option<String>,
    pub is_retval: bool,
    pub attrs: Vec<AttributeDecl>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: CodeTypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            direction: Direction::In,
            size_is_ref: None,
            is_retval: false,
            attrs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: CodeTypeRef,
    pub attrs: Vec<AttributeDecl>,
    pub modifiers: Modifiers,
    pub initializer: Option<Expression>,
    pub doc: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: CodeTypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            attrs: Vec::new(),
            modifiers: Modifiers::public(),
            initializer: None,
            doc: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: CodeTypeRef,
    pub attrs: Vec<AttributeDecl>,
    pub modifiers: Modifiers,
    pub has_get: bool,
    pub has_set: bool,
    /// Attributes rendered on the `get` accessor (`[return: ...]`)
    pub get_attrs: Vec<AttributeDecl>,
    /// Attributes rendered on the `set` accessor (`[param: ...]`)
    pub set_attrs: Vec<AttributeDecl>,
    /// Accessor bodies; `None` renders `get;`/`set;` stubs
    pub get_body: Option<Vec<Statement>>,
    pub set_body: Option<Vec<Statement>>,
    pub doc: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: CodeTypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            attrs: Vec::new(),
            modifiers: Modifiers::default(),
            has_get: false,
            has_set: false,
            get_attrs: Vec::new(),
            set_attrs: Vec::new(),
            get_body: None,
            set_body: None,
            doc: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub return_type: CodeTypeRef,
    /// Attributes rendered with the `return:` target
    pub return_attrs: Vec<AttributeDecl>,
    pub parameters: Vec<Parameter>,
    pub attrs: Vec<AttributeDecl>,
    pub modifiers: Modifiers,
    /// `None` renders a bodiless declaration ending in `;`
    pub body: Option<Vec<Statement>>,
    pub doc: Option<String>,
    /// Line comments emitted above the method (`NOTE:` annotations)
    pub comments: Vec<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: CodeTypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            return_attrs: Vec::new(),
            parameters: Vec::new(),
            attrs: Vec::new(),
            modifiers: Modifiers::default(),
            body: None,
            doc: None,
            comments: Vec::new(),
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.is(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub parameters: Vec<Parameter>,
    pub attrs: Vec<AttributeDecl>,
    pub modifiers: Modifiers,
    /// Arguments forwarded to `base(...)`
    pub base_args: Option<Vec<Expression>>,
    pub body: Option<Vec<Statement>>,
    pub doc: Option<String>,
}

impl Default for Constructor {
    fn default() -> Self {
        Self {
            parameters: Vec::new(),
            attrs: Vec::new(),
            modifiers: Modifiers::public(),
            base_args: None,
            body: Some(Vec::new()),
            doc: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticConstructor {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub ty: CodeTypeRef,
    pub attrs: Vec<AttributeDecl>,
    pub modifiers: Modifiers,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(Field),
    Property(Property),
    Method(Method),
    Constructor(Constructor),
    StaticConstructor(StaticConstructor),
    Event(Event),
    /// Raw target-language text, one entry per line
    Snippet(Vec<String>),
    NestedType(Box<TypeDecl>),
}

impl Member {
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Field(f) => Some(&f.name),
            Member::Property(p) => Some(&p.name),
            Member::Method(m) => Some(&m.name),
            Member::Event(e) => Some(&e.name),
            Member::NestedType(t) => Some(&t.name),
            Member::Constructor(_) | Member::StaticConstructor(_) | Member::Snippet(_) => None,
        }
    }

    pub fn modifiers_mut(&mut self) -> Option<&mut Modifiers> {
        match self {
            Member::Field(f) => Some(&mut f.modifiers),
            Member::Property(p) => Some(&mut p.modifiers),
            Member::Method(m) => Some(&mut m.modifiers),
            Member::Constructor(c) => Some(&mut c.modifiers),
            Member::Event(e) => Some(&mut e.modifiers),
            Member::NestedType(t) => Some(&mut t.modifiers),
            Member::StaticConstructor(_) | Member::Snippet(_) => None,
        }
    }

    pub fn modifiers(&self) -> Option<&Modifiers> {
        match self {
            Member::Field(f) => Some(&f.modifiers),
            Member::Property(p) => Some(&p.modifiers),
            Member::Method(m) => Some(&m.modifiers),
            Member::Constructor(c) => Some(&c.modifiers),
            Member::Event(e) => Some(&e.modifiers),
            Member::NestedType(t) => Some(&t.modifiers),
            Member::StaticConstructor(_) | Member::Snippet(_) => None,
        }
    }

    /// Sort rank for non-verbatim emission: fields, snippets, static
    /// constructor, constructors, properties, events, methods, nested types
    pub fn order_rank(&self) -> u8 {
        match self {
            Member::Field(_) => 0,
            Member::Snippet(_) => 1,
            Member::StaticConstructor(_) => 2,
            Member::Constructor(_) => 3,
            Member::Property(_) => 4,
            Member::Event(_) => 5,
            Member::Method(_) => 6,
            Member::NestedType(_) => 7,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Member::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Member::Property(p) => Some(p),
            _ => None,
        }
    }
}
