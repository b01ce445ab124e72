//! Declaration tree → program model
//!
//! The builder makes three passes over one unit:
//!
//! 1. a prescan that declares every type name and typedef alias with the
//!    [`TypeMapper`] and records which holder class owns each constant,
//! 2. a left-to-right conversion of each declaration into namespace entries,
//! 3. the enum fixup pass for values that referenced members declared later.
//!
//! All state lives in the builder, so independent units can be built in
//! parallel.

use rustc_hash::FxHashMap;

use crate::codemodel::{AttributeDecl, Expression};
use crate::parser::{AttributeSet, Declaration, DeclarationTree, ModuleDecl};

use super::enums::PendingValue;
use super::model::ProgramModel;
use super::options::BuildContext;
use super::types::{DeclaredKind, TypeMapper};

pub struct ModelBuilder {
    pub(super) ctx: BuildContext,
    pub(super) mapper: TypeMapper,
    pub(super) model: ProgramModel,
    /// Enum and constant values waiting for the fixup pass
    pub(super) pending: Vec<PendingValue>,
    /// Evaluated integer constants, for fixed array sizes
    pub(super) const_values: FxHashMap<String, i64>,
    /// Holder class for constants of the module being visited
    pub(super) current_holder: Option<String>,
}

impl ModelBuilder {
    pub fn new(ctx: BuildContext) -> Self {
        Self {
            ctx,
            mapper: TypeMapper::new(),
            model: ProgramModel::default(),
            pending: Vec::new(),
            const_values: FxHashMap::default(),
            current_holder: None,
        }
    }

    /// Convert a whole unit.
    pub fn build(mut self, tree: &DeclarationTree) -> ProgramModel {
        self.model.namespace_name = self.namespace_name(tree);
        self.model.imports = self.imports();

        self.prescan(tree);
        for decl in &tree.declarations {
            self.visit(decl);
        }
        self.resolve_pending();

        self.model.aliases = self
            .mapper
            .aliases()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        tracing::debug!(
            namespace = %self.model.namespace_name,
            types = self.model.namespace.len(),
            errors = self.model.diagnostics.error_count(),
            warnings = self.model.diagnostics.warning_count(),
            "built program model"
        );
        self.model
    }

    fn namespace_name(&self, tree: &DeclarationTree) -> String {
        if let Some(namespace) = &self.ctx.options.namespace {
            return namespace.clone();
        }
        tree.declarations
            .iter()
            .find_map(|decl| match decl {
                Declaration::Module(module) if module.is_library => Some(module.name.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| self.ctx.options.fallback_namespace.clone())
    }

    fn imports(&self) -> Vec<String> {
        let mut imports: Vec<String> = [
            "System",
            "System.Runtime.InteropServices",
            "System.Runtime.CompilerServices",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for extra in self.ctx.factory.imports() {
            if !imports.iter().any(|i| i == extra) {
                imports.push(extra.to_string());
            }
        }
        imports
    }

    // =========================================================================
    // Prescan
    // =========================================================================

    fn prescan(&mut self, tree: &DeclarationTree) {
        self.prescan_block(&tree.declarations, None);
    }

    fn prescan_block(&mut self, decls: &[Declaration], holder: Option<&str>) {
        for decl in decls {
            match decl {
                Declaration::Module(module) => {
                    let inner = module_holder(module);
                    self.prescan_block(&module.body, inner.as_deref().or(holder));
                }
                Declaration::Interface(iface) => {
                    self.mapper.declare(&iface.name, DeclaredKind::Interface);
                    self.prescan_block(&iface.body, holder);
                }
                Declaration::CoClass(coclass) => {
                    self.mapper.declare(&coclass.name, DeclaredKind::CoClass)
                }
                Declaration::Struct(s) => self.mapper.declare(&s.name, DeclaredKind::Struct),
                Declaration::Union(u) => self.mapper.declare(&u.name, DeclaredKind::Union),
                Declaration::Enum(e) => self.mapper.declare(&e.name, DeclaredKind::Enum),
                Declaration::Exception(e) => self.mapper.declare(&e.name, DeclaredKind::Struct),
                Declaration::Typedef(t) => self.mapper.alias(&t.name, t.alias_of.clone()),
                Declaration::Const(c) => {
                    let holder = holder
                        .map(str::to_string)
                        .unwrap_or_else(|| self.ctx.options.constants_class.clone());
                    self.model.constants.entry(c.name.to_string()).or_insert(holder);
                    let values = &self.const_values;
                    let value = c.value.evaluate(&|name: &str| values.get(name).copied());
                    if let Some(value) = value {
                        self.const_values.entry(c.name.to_string()).or_insert(value);
                    }
                }
                Declaration::Import(_)
                | Declaration::ImportLib(_)
                | Declaration::CppQuote(_)
                | Declaration::Pragma(_) => {}
            }
        }
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    pub(super) fn visit(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Module(module) => self.convert_module(module),
            Declaration::Interface(iface) => {
                for nested in &iface.body {
                    self.visit(nested);
                }
                self.convert_interface(iface);
            }
            Declaration::CoClass(coclass) => self.convert_coclass(coclass),
            Declaration::Struct(s) => self.convert_struct(s),
            Declaration::Union(u) => self.convert_union(u),
            Declaration::Enum(e) => self.convert_enum(e),
            Declaration::Exception(e) => self.convert_exception(e),
            Declaration::Const(c) => self.convert_const(c),
            Declaration::Typedef(t) => {
                tracing::trace!(name = %t.name, target = %t.alias_of, "typedef alias");
            }
            Declaration::CppQuote(text) => self.model.passthrough.push(text.text.clone()),
            Declaration::Pragma(text) => {
                tracing::trace!(line = text.line, "pragma passthrough ignored");
            }
            Declaration::Import(import) => {
                tracing::debug!(files = ?import.files, "import not followed");
            }
            Declaration::ImportLib(import) => {
                tracing::debug!(file = %import.file, "importlib not followed");
            }
        }
    }

    fn convert_module(&mut self, module: &ModuleDecl) {
        let previous = self.current_holder.take();
        self.current_holder = module_holder(module);
        for decl in &module.body {
            self.visit(decl);
        }
        if !module.is_library {
            self.convert_module_functions(module);
        }
        self.current_holder = previous;
    }

    // =========================================================================
    // Shared helpers
    // =========================================================================

    /// Documentation for a symbol: the lookup first, then `helpstring`
    pub(super) fn doc_for(&self, name: &str, line: u32, attrs: Option<&AttributeSet>) -> Option<String> {
        self.ctx
            .docs
            .lookup(name, line)
            .or_else(|| attrs.and_then(|a| a.scalar("helpstring")).map(str::to_string))
            .filter(|doc| !doc.trim().is_empty())
    }

    /// `[Guid("...")]` from a `uuid` attribute, normalized to upper case
    pub(super) fn guid(&mut self, name: &str, line: u32, attrs: &AttributeSet) -> Option<uuid::Uuid> {
        let text = attrs.scalar("uuid")?;
        match uuid::Uuid::parse_str(text.trim()) {
            Ok(guid) => Some(guid),
            Err(_) => {
                self.model.diagnostics.invalid_uuid(line, name, text);
                None
            }
        }
    }
}

/// Holder class for constants declared inside a module (not a library)
fn module_holder(module: &ModuleDecl) -> Option<String> {
    (!module.is_library).then(|| module.name.to_string())
}

pub(super) fn guid_attr(guid: &uuid::Uuid) -> AttributeDecl {
    let text = guid.hyphenated().to_string().to_uppercase();
    AttributeDecl::new("Guid").with_arg(Expression::string(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::semantic::coclass::StaThreadGuard;
    use crate::semantic::model::TypeInfo;
    use crate::semantic::options::BuildOptions;
    use std::sync::Arc;

    fn build(source: &str) -> ProgramModel {
        let parse = parse(source);
        assert!(parse.ok(), "{:?}", parse.errors);
        ModelBuilder::new(BuildContext::default()).build(&parse.tree)
    }

    #[test]
    fn test_namespace_from_library() {
        let model = build("library AcmeLib { interface IA { HRESULT F(); }; };");
        assert_eq!(model.namespace_name, "AcmeLib");
        assert!(model.get("IA").is_some());
    }

    #[test]
    fn test_namespace_option_and_fallback() {
        let model = build("interface IA { HRESULT F(); };");
        assert_eq!(model.namespace_name, "Interop");

        let parse = parse("library L { };");
        let options = BuildOptions {
            namespace: Some("Explicit".into()),
            ..BuildOptions::default()
        };
        let model = ModelBuilder::new(BuildContext::new(options)).build(&parse.tree);
        assert_eq!(model.namespace_name, "Explicit");
    }

    #[test]
    fn test_imports_include_factory_requirements() {
        let model = build("interface IA { };");
        assert_eq!(model.imports[0], "System");
        assert!(!model.imports.iter().any(|i| i == "System.Threading"));

        let parse = parse("interface IA { };");
        let ctx = BuildContext::default().with_factory(Arc::new(StaThreadGuard));
        let model = ModelBuilder::new(ctx).build(&parse.tree);
        assert!(model.imports.iter().any(|i| i == "System.Threading"));
    }

    #[test]
    fn test_typedefs_and_forward_decls_are_not_emitted() {
        let model = build("typedef long MYLONG; interface IA; interface IA { HRESULT F([in] MYLONG v); };");
        assert_eq!(model.namespace.len(), 1);
        assert!(model.forward_decls.contains("IA"));
        assert!(model.aliases.contains_key("MYLONG"));
        let method = model.get("IA").unwrap().decl.members[0].as_method().unwrap().clone();
        assert_eq!(method.parameters[0].ty.name, "int");
    }

    #[test]
    fn test_cpp_quote_is_kept_as_passthrough() {
        let model = build("cpp_quote(\"#define X 1\")");
        assert_eq!(model.passthrough, vec!["#define X 1".to_string()]);
    }

    #[test]
    fn test_interface_body_declarations_come_first() {
        let model = build("interface IA { typedef enum { A1, A2 } AKind; HRESULT F([in] AKind k); };");
        let keys: Vec<_> = model.namespace.keys().cloned().collect();
        assert_eq!(keys, vec!["AKind".to_string(), "IA".to_string()]);
        assert!(matches!(model.get("AKind").unwrap().info, TypeInfo::Enum));
    }
}
