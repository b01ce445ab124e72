//! Method and parameter conversion
//!
//! Handles parameter direction, pointer consumption, retval extraction, and
//! the post-hoc `size_is`/`iid_is` wiring that needs the final parameter list.

use crate::codemodel::{AttributeDecl, AttributeTarget, CodeTypeRef, Direction, Expression, Method, Parameter};
use crate::parser::{FunctionProto, Param, parse_integer};

use super::diagnostics::Diagnostics;
use super::rules::ConversionRules;
use super::types::{TypeCategory, TypeMapper, marshal_as};

/// Property accessor kind of a prototype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKind {
    Get,
    Put,
    PutRef,
}

/// How the converted method will be called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStyle {
    /// vtable method of an `IUnknown`/dual interface
    Vtable,
    /// dispinterface method
    Dispatch,
    /// `module` entry point behind `[DllImport]`
    Native,
}

/// A method with the metadata property synthesis needs
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedMethod {
    pub method: Method,
    pub prop: Option<PropKind>,
    /// Parameter count as written in IDL, before retval extraction
    pub idl_param_count: usize,
    pub line: u32,
}

/// Shared state for converting the methods of one declaration
pub struct MethodConverter<'a> {
    pub mapper: &'a TypeMapper,
    pub rules: &'a ConversionRules,
    pub diagnostics: &'a mut Diagnostics,
}

/// A parameter before the final list is known
struct PendingParam {
    param: Parameter,
    marshal: Option<AttributeDecl>,
    iid_is: Option<String>,
}

impl<'a> MethodConverter<'a> {
    pub fn convert(&mut self, proto: &FunctionProto, style: CallStyle) -> ConvertedMethod {
        let prop = prop_kind(proto);
        let mut pending: Vec<PendingParam> = proto
            .params
            .iter()
            .map(|param| {
                let mut param = param.clone();
                self.rules.apply(&mut param);
                self.convert_param(&param)
            })
            .collect();

        let mut method = Method::new(proto.name.as_str(), CodeTypeRef::void());

        let resolved_return = self.mapper.resolve_alias(&proto.return_type);
        let returns_hresult = resolved_return.array_rank == 0
            && matches!(resolved_return.base_name.as_str(), "HRESULT" | "SCODE")
            && style != CallStyle::Native;

        if returns_hresult {
            let retval = pending
                .iter()
                .position(|p| p.param.is_retval && p.param.ty.array_rank == 0);
            match retval {
                Some(index) => {
                    let extracted = pending.remove(index);
                    method.return_type = extracted.param.ty;
                    method.return_attrs = extracted
                        .marshal
                        .into_iter()
                        .chain(extracted.param.attrs)
                        .filter(|a| !a.is("Out") && !a.is("In"))
                        .map(|a| a.with_target(AttributeTarget::Return))
                        .collect();
                }
                None => {
                    if proto.attrs.has_custom("preservesig") {
                        method.attrs.push(AttributeDecl::new("PreserveSig"));
                    }
                }
            }
        } else {
            let mapped = self.mapper.map(&proto.return_type, false);
            method.return_type = if mapped.pointers > 0 {
                CodeTypeRef::named("IntPtr")
            } else {
                mapped.ty
            };
            if mapped.pointers == 0 {
                if let Some(marshal) = mapped.marshal {
                    method.return_attrs.push(marshal.with_target(AttributeTarget::Return));
                }
            }
            if style == CallStyle::Vtable {
                method.attrs.push(AttributeDecl::new("PreserveSig"));
            }
        }

        if let Some(id) = proto.attrs.scalar("id") {
            method.attrs.push(dispid(id));
        }

        self.wire_sizes(proto, &mut method, &mut pending);

        ConvertedMethod {
            method,
            prop,
            idl_param_count: proto.params.len(),
            line: proto.line,
        }
    }

    fn convert_param(&self, param: &Param) -> PendingParam {
        let attrs = &param.attrs;
        let mapped = self.mapper.map(&param.ty, attrs.has("string"));
        let mut pointers = mapped.pointers + param.dims.len() as u32;
        let mut ty = mapped.ty;
        let mut marshal = mapped.marshal;
        let mut extra_attrs = Vec::new();

        let has_in = attrs.has("in");
        let has_out = attrs.has("out");
        let mut direction = match (has_in, has_out) {
            (true, true) => Direction::Ref,
            (_, true) => Direction::Out,
            _ => Direction::In,
        };

        let size_is = attrs.scalar("size_is").map(str::to_string);
        let iid_is = attrs.scalar("iid_is").map(str::to_string);

        if iid_is.is_some() {
            ty = CodeTypeRef::named("object");
            marshal = None;
            pointers = 0;
        } else if size_is.is_some() && pointers > 0 && mapped.category != TypeCategory::Array {
            ty = ty.array();
            pointers -= 1;
            if direction != Direction::In && pointers > 0 {
                pointers -= 1;
            } else if direction == Direction::Out {
                direction = Direction::In;
                extra_attrs.push(AttributeDecl::new("Out"));
            } else if direction == Direction::Ref {
                direction = Direction::In;
                extra_attrs.push(AttributeDecl::new("In"));
                extra_attrs.push(AttributeDecl::new("Out"));
            }
            // element marshaling moves into the LPArray attribute
            marshal = None;
        } else if direction != Direction::In && pointers > 0 {
            pointers -= 1;
        } else if direction == Direction::In
            && pointers == 1
            && matches!(
                mapped.category,
                TypeCategory::Value | TypeCategory::Struct | TypeCategory::Enum | TypeCategory::String
            )
        {
            direction = Direction::Ref;
            pointers = 0;
        }

        if pointers > 0 {
            tracing::trace!(param = %param.name, pointers, "unrepresentable pointer depth, using IntPtr");
            ty = CodeTypeRef::named("IntPtr");
            marshal = None;
        }

        if attrs.has("optional") {
            extra_attrs.push(AttributeDecl::new("Optional"));
        }

        let mut parameter = Parameter::new(param.name.as_str(), ty);
        parameter.direction = direction;
        parameter.is_retval = attrs.has("retval");
        parameter.size_is_ref = size_is.map(|s| normalize_referent(&s));
        parameter.attrs = extra_attrs;

        PendingParam {
            param: parameter,
            marshal,
            iid_is: iid_is.map(|s| normalize_referent(&s)),
        }
    }

    /// Resolve `size_is`/`iid_is` referents against the final parameter list.
    fn wire_sizes(&mut self, proto: &FunctionProto, method: &mut Method, pending: &mut Vec<PendingParam>) {
        let names: Vec<String> = pending.iter().map(|p| p.param.name.clone()).collect();
        let restricted = proto.attrs.has("restricted");

        for entry in pending.iter_mut() {
            if let Some(referent) = entry.param.size_is_ref.clone() {
                let marshal = marshal_as("LPArray");
                let marshal = if let Some(count) = constant_size(&referent) {
                    marshal.with_named_arg("SizeConst", Expression::int(count))
                } else if let Some(index) = names.iter().position(|n| *n == referent) {
                    marshal.with_named_arg("SizeParamIndex", Expression::int(index as i64))
                } else {
                    if !restricted {
                        self.diagnostics.unresolved_size_is(proto.line, &proto.name, &referent);
                    }
                    method.comments.push(format!(
                        "NOTE: size_is({}) on parameter '{}' could not be resolved",
                        referent, entry.param.name
                    ));
                    marshal
                };
                entry.marshal = Some(marshal);
            }

            if let Some(referent) = entry.iid_is.clone() {
                let marshal = match names.iter().position(|n| *n == referent) {
                    Some(index) => marshal_as("Interface")
                        .with_named_arg("IidParameterIndex", Expression::int(index as i64)),
                    None => {
                        self.diagnostics.unresolved_iid_is(proto.line, &proto.name, &referent);
                        marshal_as("IUnknown")
                    }
                };
                entry.marshal = Some(marshal);
            }
        }

        method.parameters = pending
            .drain(..)
            .map(|entry| {
                let mut param = entry.param;
                if let Some(marshal) = entry.marshal {
                    param.attrs.push(marshal);
                }
                param
            })
            .collect();
    }
}

fn prop_kind(proto: &FunctionProto) -> Option<PropKind> {
    if proto.attrs.has("propget") {
        Some(PropKind::Get)
    } else if proto.attrs.has("propputref") {
        Some(PropKind::PutRef)
    } else if proto.attrs.has("propput") {
        Some(PropKind::Put)
    } else {
        None
    }
}

/// `[DispId(n)]` from the text of `id(n)`
pub fn dispid(id: &str) -> AttributeDecl {
    let value = match parse_integer(id.trim()) {
        Some(crate::parser::Expr::Int { value, .. }) => Expression::int(value as i32 as i64),
        _ => Expression::snippet(id.trim()),
    };
    AttributeDecl::new("DispId").with_arg(value)
}

/// `*pcb`, `(cb)` and ` cb ` all name `cb`
fn normalize_referent(text: &str) -> String {
    text.trim()
        .trim_start_matches(['*', '(', ' '])
        .trim_end_matches([')', ' '])
        .trim()
        .to_string()
}

fn constant_size(referent: &str) -> Option<i64> {
    match parse_integer(referent) {
        Some(crate::parser::Expr::Int { value, .. }) => i64::try_from(value).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Declaration, parse};
    use crate::semantic::diagnostics::codes;
    use crate::semantic::types::DeclaredKind;

    fn convert(source: &str, style: CallStyle) -> (ConvertedMethod, Diagnostics) {
        let parse = parse(source);
        assert!(parse.ok(), "{:?}", parse.errors);
        let Declaration::Interface(iface) = &parse.tree.declarations[0] else {
            panic!("expected interface");
        };
        let mut mapper = TypeMapper::new();
        mapper.declare("IFoo", DeclaredKind::Interface);
        let rules = ConversionRules::new();
        let mut diagnostics = Diagnostics::new();
        let converted = MethodConverter {
            mapper: &mapper,
            rules: &rules,
            diagnostics: &mut diagnostics,
        }
        .convert(&iface.members[0], style);
        (converted, diagnostics)
    }

    #[test]
    fn test_retval_becomes_return_type() {
        let (converted, _) = convert(
            "interface I { HRESULT M([out, retval] int* result); }",
            CallStyle::Vtable,
        );
        assert_eq!(converted.method.return_type, CodeTypeRef::named("int"));
        assert!(converted.method.parameters.is_empty());
        assert!(!converted.method.has_attr("PreserveSig"));
        assert_eq!(converted.idl_param_count, 1);
    }

    #[test]
    fn test_retval_marshaling_moves_to_return() {
        let (converted, _) = convert(
            "interface I { HRESULT M([out, retval] BSTR* name); }",
            CallStyle::Vtable,
        );
        assert_eq!(converted.method.return_type, CodeTypeRef::named("string"));
        assert_eq!(converted.method.return_attrs.len(), 1);
        assert_eq!(converted.method.return_attrs[0].target, Some(AttributeTarget::Return));
    }

    #[test]
    fn test_hresult_without_retval_is_void() {
        let (converted, _) = convert("interface I { HRESULT M([in] long a); }", CallStyle::Vtable);
        assert!(converted.method.return_type.is_void());
        assert!(!converted.method.has_attr("PreserveSig"));

        let (marked, _) = convert(
            "interface I { [custom(PreserveSig, 1)] HRESULT M([in] long a); }",
            CallStyle::Vtable,
        );
        assert!(marked.method.return_type.is_void());
        assert!(marked.method.has_attr("PreserveSig"));
    }

    #[test]
    fn test_non_hresult_return_keeps_type() {
        let (converted, _) = convert("interface I { long M(void); }", CallStyle::Vtable);
        assert_eq!(converted.method.return_type, CodeTypeRef::named("int"));
        assert!(converted.method.has_attr("PreserveSig"));
    }

    #[test]
    fn test_directions() {
        let (converted, _) = convert(
            "interface I { HRESULT M([in] long a, [out] long* b, [in, out] BSTR* c, [in] GUID* d, [out] IFoo** e); }",
            CallStyle::Vtable,
        );
        let params = &converted.method.parameters;
        assert_eq!(params[0].direction, Direction::In);
        assert_eq!(params[1].direction, Direction::Out);
        assert_eq!(params[1].ty, CodeTypeRef::named("int"));
        assert_eq!(params[2].direction, Direction::Ref);
        assert_eq!(params[2].ty, CodeTypeRef::named("string"));
        assert_eq!(params[3].direction, Direction::Ref);
        assert_eq!(params[3].ty, CodeTypeRef::named("Guid"));
        assert_eq!(params[4].direction, Direction::Out);
        assert_eq!(params[4].ty, CodeTypeRef::named("IFoo"));
    }

    #[test]
    fn test_size_is_sibling_and_constant() {
        let (converted, diagnostics) = convert(
            "interface I { HRESULT M([in] long count, [in, size_is(count)] long* items, [in, size_is(16)] BYTE* key); }",
            CallStyle::Vtable,
        );
        assert!(diagnostics.is_empty());
        let items = &converted.method.parameters[1];
        assert_eq!(items.ty.to_string(), "int[]");
        assert_eq!(items.size_is_ref.as_deref(), Some("count"));
        let marshal = &items.attrs[0];
        assert_eq!(marshal.args[1].name.as_deref(), Some("SizeParamIndex"));
        assert_eq!(marshal.args[1].value, Expression::int(0));

        let key = &converted.method.parameters[2];
        assert_eq!(key.attrs[0].args[1].name.as_deref(), Some("SizeConst"));
        assert_eq!(key.attrs[0].args[1].value, Expression::int(16));
    }

    #[test]
    fn test_unresolved_size_is_reports_and_notes() {
        let (converted, diagnostics) = convert(
            "interface I { HRESULT M([in, size_is(missing)] long* items); }",
            CallStyle::Vtable,
        );
        assert_eq!(diagnostics.with_code(codes::UNRESOLVED_SIZE_IS).len(), 1);
        assert!(converted.method.comments[0].starts_with("NOTE: size_is(missing)"));

        let (_, quiet) = convert(
            "interface I { [restricted] HRESULT M([in, size_is(missing)] long* items); }",
            CallStyle::Vtable,
        );
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_iid_is() {
        let (converted, diagnostics) = convert(
            "interface I { HRESULT QueryService([in] REFIID riid, [out, iid_is(riid)] void** ppv); }",
            CallStyle::Vtable,
        );
        assert!(diagnostics.is_empty());
        let ppv = &converted.method.parameters[1];
        assert_eq!(ppv.ty, CodeTypeRef::named("object"));
        assert_eq!(ppv.direction, Direction::Out);
        assert_eq!(ppv.attrs[0].args[1].name.as_deref(), Some("IidParameterIndex"));
        assert_eq!(converted.method.parameters[0].direction, Direction::Ref);
    }

    #[test]
    fn test_dispid_and_prop_kind() {
        let (converted, _) = convert(
            "interface I { [id(0x60020000), propget] HRESULT Name([out, retval] BSTR* v); }",
            CallStyle::Dispatch,
        );
        assert_eq!(converted.prop, Some(PropKind::Get));
        let id = converted.method.attrs.iter().find(|a| a.is("DispId")).unwrap();
        assert_eq!(id.args[0].value, Expression::int(0x60020000));
    }
}
