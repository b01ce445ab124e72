//! Program model: the converted types of one unit plus its resolver tables.
//!
//! ```text
//! ProgramModel
//! ├── namespace: IndexMap<String, TypeModel>   (declaration order)
//! ├── enum_member_owner: member → enum
//! ├── type_by_name: interface name → namespace key (base lookup)
//! ├── aliases / forward_decls / constants
//! └── diagnostics
//! ```
//!
//! Cross references between types are by name only.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use uuid::Uuid;

use super::diagnostics::Diagnostics;
use crate::codemodel::{CompileUnit, Member, Namespace, TypeDecl};
use crate::parser::TypeRef;

/// How an interface is exposed to COM
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// Derives from `IUnknown` only
    #[default]
    Unknown,
    /// vtable plus `IDispatch`
    Dual,
    /// `dispinterface`, late bound only
    Dispatch,
}

impl InterfaceKind {
    /// `ComInterfaceType` member for `[InterfaceType(...)]`
    pub fn com_interface_type(self) -> &'static str {
        match self {
            InterfaceKind::Unknown => "InterfaceIsIUnknown",
            InterfaceKind::Dual => "InterfaceIsDual",
            InterfaceKind::Dispatch => "InterfaceIsIDispatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceInfo {
    pub kind: InterfaceKind,
    /// The single structural base, if any
    pub base: Option<String>,
    /// Members declared by this interface, before flattening
    pub own_members: Vec<Member>,
    pub guid: Option<Uuid>,
}

/// What a namespace entry was built from
#[derive(Debug, Clone, PartialEq)]
pub enum TypeInfo {
    Interface(InterfaceInfo),
    /// The coclass re-expressed as an interface
    CoClassInterface { coclass: String },
    /// The `_XClass` runtime-callable wrapper
    CoClassObject { coclass: String },
    /// The static `CoX` creator
    Creator { coclass: String },
    Struct,
    Union,
    Enum,
    Exception,
    /// Holder class for constants and `module` entry points
    Constants,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeModel {
    pub decl: TypeDecl,
    pub info: TypeInfo,
}

impl TypeModel {
    pub fn new(decl: TypeDecl, info: TypeInfo) -> Self {
        Self { decl, info }
    }

    pub fn interface_info(&self) -> Option<&InterfaceInfo> {
        match &self.info {
            TypeInfo::Interface(info) => Some(info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgramModel {
    pub namespace_name: String,
    /// `using` directives for the generated file
    pub imports: Vec<String>,
    pub namespace: IndexMap<String, TypeModel>,
    pub enum_member_owner: FxHashMap<String, String>,
    pub type_by_name: FxHashMap<String, String>,
    pub aliases: FxHashMap<String, TypeRef>,
    pub forward_decls: FxHashSet<String>,
    /// Constant name → holder class
    pub constants: FxHashMap<String, String>,
    /// `cpp_quote` text, kept as comments
    pub passthrough: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl ProgramModel {
    pub fn new(namespace_name: impl Into<String>) -> Self {
        Self {
            namespace_name: namespace_name.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeModel> {
        self.namespace.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeModel> {
        self.namespace.get_mut(name)
    }

    /// Insert a type; a name already present is reported and the first kept.
    pub fn insert(&mut self, model: TypeModel) -> bool {
        let name = model.decl.name.clone();
        if self.namespace.contains_key(&name) {
            self.diagnostics.duplicate_type(model.decl.line, &name);
            return false;
        }
        if matches!(model.info, TypeInfo::Interface(_)) {
            self.type_by_name.insert(name.clone(), name.clone());
        }
        self.namespace.insert(name, model);
        true
    }

    /// Look up a converted interface by name
    pub fn interface(&self, name: &str) -> Option<(&TypeModel, &InterfaceInfo)> {
        let key = self.type_by_name.get(name)?;
        let model = self.namespace.get(key)?;
        model.interface_info().map(|info| (model, info))
    }

    /// Structural ancestors of an interface, nearest first
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut current = self.interface(name).and_then(|(_, info)| info.base.clone());
        while let Some(base) = current {
            if base == name || out.contains(&base) {
                tracing::warn!(interface = name, "inheritance cycle");
                break;
            }
            current = self.interface(&base).and_then(|(_, info)| info.base.clone());
            out.push(base);
        }
        out
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeModel> {
        self.namespace.values()
    }

    /// The code-model tree handed to the emitter
    pub fn to_compile_unit(&self) -> CompileUnit {
        let mut namespace = Namespace::new(self.namespace_name.clone());
        namespace.imports = self.imports.clone();
        namespace.comments = self.passthrough.clone();
        namespace.types = self.namespace.values().map(|m| m.decl.clone()).collect();
        CompileUnit {
            assembly_attrs: Vec::new(),
            namespaces: vec![namespace],
        }
    }
}
