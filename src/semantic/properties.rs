//! Property synthesis from `propget`/`propput`/`propputref` prototypes

use crate::codemodel::{AttributeDecl, AttributeTarget, Member, Method, Property};

use super::params::{ConvertedMethod, PropKind};

/// Turn converted prototypes into interface members.
///
/// Accessors taking exactly one IDL parameter merge into a single
/// [`Property`] per name, positioned at the first accessor. Indexed
/// accessors stay methods named `get_X`, `set_X`, or `let_X` when a
/// `set_X` already exists.
pub fn synthesize(methods: Vec<ConvertedMethod>) -> Vec<Member> {
    let mut out: Vec<Member> = Vec::with_capacity(methods.len());
    for converted in methods {
        let Some(kind) = converted.prop else {
            out.push(Member::Method(converted.method));
            continue;
        };
        if converted.idl_param_count == 1 {
            merge_accessor(&mut out, kind, converted.method);
        } else {
            let mut method = converted.method;
            method.name = accessor_method_name(&out, kind, &method.name);
            out.push(Member::Method(method));
        }
    }
    out
}

fn accessor_method_name(existing: &[Member], kind: PropKind, name: &str) -> String {
    match kind {
        PropKind::Get => format!("get_{}", name),
        PropKind::Put | PropKind::PutRef => {
            let setter = format!("set_{}", name);
            let taken = existing.iter().any(|m| m.name() == Some(setter.as_str()));
            if taken { format!("let_{}", name) } else { setter }
        }
    }
}

fn merge_accessor(out: &mut Vec<Member>, kind: PropKind, method: Method) {
    let existing = out.iter_mut().find_map(|m| match m {
        Member::Property(p) if p.name == method.name => Some(p),
        _ => None,
    });
    match existing {
        Some(property) => apply_accessor(property, kind, method),
        None => {
            let ty = accessor_type(kind, &method);
            let mut property = Property::new(method.name.clone(), ty);
            property.modifiers = method.modifiers.clone();
            property.doc = method.doc.clone();
            apply_accessor(&mut property, kind, method);
            out.push(Member::Property(property));
        }
    }
}

fn accessor_type(kind: PropKind, method: &Method) -> crate::codemodel::CodeTypeRef {
    match kind {
        PropKind::Get if !method.return_type.is_void() => method.return_type.clone(),
        _ => method
            .parameters
            .first()
            .map(|p| p.ty.clone())
            .unwrap_or_else(|| method.return_type.clone()),
    }
}

fn apply_accessor(property: &mut Property, kind: PropKind, method: Method) {
    for attr in method.attrs.iter().filter(|a| a.is("DispId")) {
        if !property.attrs.iter().any(|a| a.is("DispId")) {
            property.attrs.push(attr.clone());
        }
    }
    if property.doc.is_none() {
        property.doc = method.doc.clone();
    }
    match kind {
        PropKind::Get => {
            property.has_get = true;
            let marshal: Vec<AttributeDecl> = if method.return_type.is_void() {
                parameter_marshal(&method)
            } else {
                method.return_attrs
            };
            property.get_attrs = marshal
                .into_iter()
                .map(|a| a.with_target(AttributeTarget::Return))
                .collect();
        }
        PropKind::Put | PropKind::PutRef => {
            property.has_set = true;
            property.set_attrs = parameter_marshal(&method)
                .into_iter()
                .map(|a| a.with_target(AttributeTarget::Param))
                .collect();
        }
    }
}

fn parameter_marshal(method: &Method) -> Vec<AttributeDecl> {
    method
        .parameters
        .first()
        .map(|p| p.attrs.iter().filter(|a| a.is("MarshalAs")).cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codemodel::{CodeTypeRef, Parameter};
    use crate::semantic::types::marshal_as;

    fn accessor(name: &str, kind: Option<PropKind>, params: usize) -> ConvertedMethod {
        let mut method = Method::new(name, CodeTypeRef::void());
        match kind {
            Some(PropKind::Get) if params == 1 => {
                method.return_type = CodeTypeRef::named("string");
                method.return_attrs.push(marshal_as("BStr").with_target(AttributeTarget::Return));
            }
            _ => {
                for i in 0..params {
                    let mut param = Parameter::new(format!("p{}", i), CodeTypeRef::named("string"));
                    param.attrs.push(marshal_as("BStr"));
                    method.parameters.push(param);
                }
            }
        }
        ConvertedMethod {
            method,
            prop: kind,
            idl_param_count: params,
            line: 1,
        }
    }

    #[test]
    fn test_get_and_put_merge_into_one_property() {
        let members = synthesize(vec![
            accessor("Name", Some(PropKind::Get), 1),
            accessor("Other", None, 0),
            accessor("Name", Some(PropKind::Put), 1),
        ]);
        assert_eq!(members.len(), 2);
        let property = members[0].as_property().unwrap();
        assert_eq!(property.name, "Name");
        assert!(property.has_get && property.has_set);
        assert_eq!(property.ty, CodeTypeRef::named("string"));
        assert_eq!(property.get_attrs[0].target, Some(AttributeTarget::Return));
        assert_eq!(property.set_attrs[0].target, Some(AttributeTarget::Param));
    }

    #[test]
    fn test_indexed_accessors_stay_methods() {
        let members = synthesize(vec![
            accessor("Item", Some(PropKind::Get), 2),
            accessor("Item", Some(PropKind::Put), 2),
            accessor("Item", Some(PropKind::PutRef), 2),
        ]);
        let names: Vec<_> = members.iter().filter_map(Member::name).collect();
        assert_eq!(names, vec!["get_Item", "set_Item", "let_Item"]);
    }

    #[test]
    fn test_read_only_property() {
        let members = synthesize(vec![accessor("Count", Some(PropKind::Get), 1)]);
        let property = members[0].as_property().unwrap();
        assert!(property.has_get);
        assert!(!property.has_set);
    }
}
