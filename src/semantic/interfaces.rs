//! Interface conversion and vtable flattening

use crate::codemodel::{
    AttributeDecl, CodeTypeRef, Expression, Member, Property, TypeDecl, TypeKind, Visibility,
};
use crate::parser::{FieldDecl, InterfaceDecl, Name};

use super::builder::{ModelBuilder, guid_attr};
use super::model::{InterfaceInfo, InterfaceKind, ProgramModel, TypeInfo, TypeModel};
use super::params::{CallStyle, MethodConverter, dispid};
use super::properties::synthesize;

/// COM marker interfaces; they decide the interface kind, never a base
const MARKER_BASES: &[&str] = &["IUnknown", "IDispatch"];

impl ModelBuilder {
    pub(super) fn convert_interface(&mut self, decl: &InterfaceDecl) {
        if decl.is_forward_decl {
            self.model.forward_decls.insert(decl.name.to_string());
            return;
        }

        let kind = interface_kind(decl);
        let base = self.structural_base(decl);
        let guid = self.guid(&decl.name, decl.line, &decl.attrs);

        let own_members = self.convert_interface_members(decl);

        let mut type_decl = TypeDecl::new(TypeKind::Interface, decl.name.as_str()).with_line(decl.line);
        type_decl.doc = self.doc_for(&decl.name, decl.line, Some(&decl.attrs));
        type_decl.base_types = base.iter().map(CodeTypeRef::named).collect();
        type_decl.attrs.push(AttributeDecl::new("ComImport"));
        if let Some(guid) = &guid {
            type_decl.attrs.push(guid_attr(guid));
        }
        type_decl.attrs.push(
            AttributeDecl::new("InterfaceType")
                .with_arg(Expression::static_field("ComInterfaceType", kind.com_interface_type())),
        );
        type_decl.preserve_member_order = true;

        let info = InterfaceInfo {
            kind,
            base,
            own_members,
            guid,
        };
        if !self.model.insert(TypeModel::new(type_decl, TypeInfo::Interface(info))) {
            return;
        }
        let members = flatten_members(&self.model, &decl.name);
        if let Some(entry) = self.model.get_mut(&decl.name) {
            entry.decl.members = members;
        }
    }

    /// The single structural base after dropping markers and redundant bases
    fn structural_base(&mut self, decl: &InterfaceDecl) -> Option<String> {
        let mut candidates: Vec<&Name> = Vec::new();
        for base in &decl.bases {
            if MARKER_BASES.contains(&base.as_str()) || candidates.contains(&base) {
                continue;
            }
            candidates.push(base);
        }

        let mut present: Vec<String> = Vec::new();
        for base in candidates {
            if self.model.interface(base).is_some() {
                present.push(base.to_string());
            } else {
                self.model.diagnostics.missing_base(decl.line, &decl.name, base);
            }
        }

        let bases = eliminate_redundant_bases(&self.model, present);
        let mut iter = bases.into_iter();
        let kept = iter.next()?;
        for dropped in iter {
            self.model.diagnostics.multiple_bases(decl.line, &decl.name, &kept, &dropped);
        }
        Some(kept)
    }

    fn convert_interface_members(&mut self, decl: &InterfaceDecl) -> Vec<Member> {
        let style = if decl.is_dispinterface {
            CallStyle::Dispatch
        } else {
            CallStyle::Vtable
        };

        let mut converted = Vec::with_capacity(decl.members.len());
        for proto in &decl.members {
            let doc = self.doc_for(&proto.name, proto.line, Some(&proto.attrs));
            let mut method = MethodConverter {
                mapper: &self.mapper,
                rules: &self.ctx.rules,
                diagnostics: &mut self.model.diagnostics,
            }
            .convert(proto, style);
            method.method.doc = doc;
            converted.push(method);
        }

        let mut members: Vec<Member> = decl
            .properties
            .iter()
            .map(|field| Member::Property(self.dispatch_property(field)))
            .collect();
        members.extend(synthesize(converted));
        members
    }

    /// A `properties:` entry of a dispinterface
    fn dispatch_property(&self, field: &FieldDecl) -> Property {
        let mapped = self.mapper.map(&field.ty, field.attrs.has("string"));
        let ty = if mapped.pointers > 0 {
            CodeTypeRef::named("IntPtr")
        } else {
            mapped.ty
        };
        let mut property = Property::new(field.name.as_str(), ty);
        if let Some(id) = field.attrs.scalar("id") {
            property.attrs.push(dispid(id));
        }
        property.has_get = true;
        property.has_set = !field.attrs.has("readonly");
        if mapped.pointers == 0 {
            if let Some(marshal) = mapped.marshal {
                property.get_attrs.push(marshal.clone().with_target(crate::codemodel::AttributeTarget::Return));
                if property.has_set {
                    property.set_attrs.push(marshal.with_target(crate::codemodel::AttributeTarget::Param));
                }
            }
        }
        property.doc = self.doc_for(&field.name, field.line, Some(&field.attrs));
        property
    }
}

/// `dual`, or an `IDispatch` base, makes a vtable interface dual.
fn interface_kind(decl: &InterfaceDecl) -> InterfaceKind {
    if decl.is_dispinterface {
        InterfaceKind::Dispatch
    } else if decl.attrs.has("dual") || decl.bases.iter().any(|b| b == "IDispatch") {
        InterfaceKind::Dual
    } else {
        InterfaceKind::Unknown
    }
}

/// Drop every base reachable through another listed base.
///
/// `[A, B]` where `B : A` becomes `[B]`; duplicates collapse to one entry.
pub fn eliminate_redundant_bases(model: &ProgramModel, bases: Vec<String>) -> Vec<String> {
    let ancestry: Vec<Vec<String>> = bases.iter().map(|b| model.ancestors(b)).collect();
    let mut kept: Vec<String> = Vec::new();
    for (i, base) in bases.iter().enumerate() {
        let reachable = ancestry
            .iter()
            .enumerate()
            .any(|(j, ancestors)| i != j && bases[j] != *base && ancestors.contains(base));
        if reachable {
            tracing::debug!(base = %base, "dropping redundant base");
            continue;
        }
        if !kept.contains(base) {
            kept.push(base.clone());
        }
    }
    kept
}

/// Member list of an interface: shadow copies of every ancestor's members,
/// root first, followed by its own.
///
/// Computed from the stored own members only, so calling it again yields
/// the same list.
pub fn flatten_members(model: &ProgramModel, name: &str) -> Vec<Member> {
    let mut members = Vec::new();
    for ancestor in model.ancestors(name).iter().rev() {
        let Some((_, info)) = model.interface(ancestor) else {
            continue;
        };
        members.extend(info.own_members.iter().cloned().map(shadow));
    }
    if let Some((_, info)) = model.interface(name) {
        members.extend(info.own_members.iter().cloned());
    }
    members
}

fn shadow(mut member: Member) -> Member {
    if let Some(modifiers) = member.modifiers_mut() {
        modifiers.is_new = true;
        modifiers.visibility = Some(Visibility::Public);
    }
    member
}
