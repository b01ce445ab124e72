//! Compilation units and namespaces

use super::types::{AttributeDecl, TypeDecl};

/// A namespace with its `using` directives and types in emission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    pub name: String,
    pub imports: Vec<String>,
    /// Comment lines emitted at the top of the namespace body
    pub comments: Vec<String>,
    pub types: Vec<TypeDecl>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One generated source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileUnit {
    /// `[assembly: ...]` attributes
    pub assembly_attrs: Vec<AttributeDecl>,
    pub namespaces: Vec<Namespace>,
}
