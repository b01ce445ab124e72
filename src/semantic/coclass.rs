//! Coclass expansion
//!
//! One coclass becomes three namespace entries, inserted together:
//!
//! ```text
//! coclass Foo { [default] interface IFoo; interface IBar; }
//!   → interface Foo : IFoo        [CoClass(typeof(_FooClass))]
//!   → class _FooClass : IFoo, IBar, Foo   extern stubs of every member
//!   → static class CoFoo          Create() from the FactoryPolicy
//! ```

use crate::codemodel::{
    AttributeDecl, BinaryOperator, CodeTypeRef, Constructor, Direction, Expression, Member, Method,
    Modifiers,
    Statement, TypeDecl, TypeKind,
};
use crate::parser::{CoClassBase, CoClassDecl};

use super::builder::{ModelBuilder, guid_attr};
use super::model::{TypeInfo, TypeModel};

/// Generates the body of the creator's `Create()` method.
pub trait FactoryPolicy: Send + Sync {
    /// Statements of `public static <interface> Create()`
    fn create_body(&self, coclass: &str, object_type: &str, interface: &str) -> Vec<Statement>;

    /// Namespaces the generated body needs
    fn imports(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// `return new _FooClass();`
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectFactory;

impl FactoryPolicy for DirectFactory {
    fn create_body(&self, _coclass: &str, object_type: &str, _interface: &str) -> Vec<Statement> {
        vec![Statement::ret(Expression::ObjectCreate {
            ty: CodeTypeRef::named(object_type),
            args: Vec::new(),
        })]
    }
}

/// Refuses creation outside a single-threaded apartment, then creates directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaThreadGuard;

impl FactoryPolicy for StaThreadGuard {
    fn create_body(&self, coclass: &str, object_type: &str, interface: &str) -> Vec<Statement> {
        let apartment = Expression::MethodInvoke {
            target: Some(Box::new(Expression::PropertyRef {
                target: Some(Box::new(Expression::TypeRef(CodeTypeRef::named("Thread")))),
                name: "CurrentThread".to_string(),
            })),
            method: "GetApartmentState".to_string(),
            type_arguments: Vec::new(),
            args: Vec::new(),
        };
        let guard = Statement::Condition {
            condition: Expression::binary(
                BinaryOperator::IdentityInequality,
                apartment,
                Expression::static_field("ApartmentState", "STA"),
            ),
            then_branch: vec![Statement::throw(Expression::ObjectCreate {
                ty: CodeTypeRef::named("InvalidOperationException"),
                args: vec![Expression::string(format!(
                    "{} must be created on a single-threaded apartment thread",
                    coclass
                ))],
            })],
            else_branch: Vec::new(),
        };
        let mut body = vec![guard];
        body.extend(DirectFactory.create_body(coclass, object_type, interface));
        body
    }

    fn imports(&self) -> Vec<&'static str> {
        vec!["System.Threading"]
    }
}

/// `[MethodImpl(MethodImplOptions.InternalCall, MethodCodeType = MethodCodeType.Runtime)]`
fn method_impl() -> AttributeDecl {
    AttributeDecl::new("MethodImpl")
        .with_arg(Expression::static_field("MethodImplOptions", "InternalCall"))
        .with_named_arg(
            "MethodCodeType",
            Expression::static_field("MethodCodeType", "Runtime"),
        )
}

fn extern_modifiers() -> Modifiers {
    let mut modifiers = Modifiers::public().with_extern();
    modifiers.is_virtual = true;
    modifiers
}

impl ModelBuilder {
    pub(super) fn convert_coclass(&mut self, decl: &CoClassDecl) {
        let name = decl.name.as_str();
        let object_name = format!("_{}Class", name);
        let implemented: Vec<&CoClassBase> = decl
            .base_interfaces
            .iter()
            .filter(|b| !b.attrs.has("source"))
            .collect();
        let default = implemented
            .first()
            .copied()
            .or_else(|| decl.base_interfaces.first());
        let doc = self.doc_for(name, decl.line, Some(&decl.attrs));

        // The coclass interface: a synonym for the default interface
        let mut interface = TypeDecl::new(TypeKind::Interface, name).with_line(decl.line);
        interface.doc = doc.clone();
        interface.preserve_member_order = true;
        interface.attrs.push(AttributeDecl::new("ComImport"));
        if let Some(default) = default {
            interface.base_types.push(CodeTypeRef::named(default.name.as_str()));
            match self.model.interface(&default.name) {
                Some((_, info)) => {
                    if let Some(guid) = &info.guid {
                        interface.attrs.push(guid_attr(guid));
                    }
                }
                // Implemented interfaces are reported below with the stubs
                None if implemented.is_empty() => {
                    self.model.diagnostics.missing_base(decl.line, name, &default.name)
                }
                None => {}
            }
        }
        interface.attrs.push(
            AttributeDecl::new("CoClass").with_arg(Expression::TypeOf(CodeTypeRef::named(&object_name))),
        );

        // The runtime-callable wrapper class
        let mut object = TypeDecl::new(TypeKind::Class, &object_name).with_line(decl.line);
        object.doc = doc;
        object.preserve_member_order = true;
        object.attrs.push(AttributeDecl::new("ComImport"));
        if let Some(guid) = self.guid(name, decl.line, &decl.attrs) {
            object.attrs.push(guid_attr(&guid));
        }
        object.attrs.push(
            AttributeDecl::new("ClassInterface")
                .with_arg(Expression::static_field("ClassInterfaceType", "None")),
        );
        object.base_types = implemented
            .iter()
            .map(|b| CodeTypeRef::named(b.name.as_str()))
            .chain(std::iter::once(CodeTypeRef::named(name)))
            .collect();
        object.members.push(Member::Constructor(Constructor {
            attrs: vec![method_impl()],
            modifiers: Modifiers::public().with_extern(),
            body: None,
            ..Constructor::default()
        }));
        let mut seen: Vec<StubKey> = Vec::new();
        let mut missing = Vec::new();
        for base in &implemented {
            let Some(entry) = self.model.get(&base.name) else {
                missing.push(base.name.to_string());
                continue;
            };
            for member in &entry.decl.members {
                let Some(key) = stub_key(member) else {
                    continue;
                };
                if seen.contains(&key) {
                    continue;
                }
                if let Some(stub) = extern_stub(member) {
                    object.members.push(stub);
                }
                seen.push(key);
            }
        }
        for base in &missing {
            self.model.diagnostics.missing_base(decl.line, name, base);
        }

        let creator = (self.ctx.options.emit_creators && !decl.attrs.has("noncreatable")).then(|| {
            let mut creator = TypeDecl::new(TypeKind::Class, format!("Co{}", name)).with_line(decl.line);
            creator.modifiers = Modifiers::public().with_static();
            let mut create = Method::new("Create", CodeTypeRef::named(name));
            create.modifiers = Modifiers::public().with_static();
            create.body = Some(self.ctx.factory.create_body(name, &object_name, name));
            creator.members.push(Member::Method(create));
            creator
        });

        tracing::debug!(
            coclass = name,
            interfaces = implemented.len(),
            creator = creator.is_some(),
            "expanding coclass"
        );

        let coclass = name.to_string();
        self.model.insert(TypeModel::new(
            interface,
            TypeInfo::CoClassInterface { coclass: coclass.clone() },
        ));
        self.model.insert(TypeModel::new(
            object,
            TypeInfo::CoClassObject { coclass: coclass.clone() },
        ));
        if let Some(creator) = creator {
            self.model.insert(TypeModel::new(creator, TypeInfo::Creator { coclass }));
        }
    }
}

/// Identity of a stub: overloads from different interfaces each need one.
#[derive(Debug, Clone, PartialEq)]
enum StubKey {
    Method(String, Vec<(Direction, CodeTypeRef)>),
    Property(String),
}

fn stub_key(member: &Member) -> Option<StubKey> {
    match member {
        Member::Method(method) => Some(StubKey::Method(
            method.name.clone(),
            method
                .parameters
                .iter()
                .map(|p| (p.direction, p.ty.clone()))
                .collect(),
        )),
        Member::Property(property) => Some(StubKey::Property(property.name.clone())),
        _ => None,
    }
}

/// Re-declare an interface member as a `public virtual extern` stub.
fn extern_stub(member: &Member) -> Option<Member> {
    match member {
        Member::Method(method) => {
            let mut stub = method.clone();
            stub.modifiers = extern_modifiers();
            stub.body = None;
            stub.attrs.push(method_impl());
            Some(Member::Method(stub))
        }
        Member::Property(property) => {
            let mut stub = property.clone();
            stub.modifiers = extern_modifiers();
            stub.get_body = None;
            stub.set_body = None;
            if stub.has_get {
                stub.get_attrs.push(method_impl());
            }
            if stub.has_set {
                stub.set_attrs.push(method_impl());
            }
            Some(Member::Property(stub))
        }
        _ => None,
    }
}
