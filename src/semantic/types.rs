//! IDL to C# type mapping
//!
//! Resolves typedef aliases, maps IDL primitives and well-known COM types to
//! their C# spelling plus a marshaling attribute, and reports how many
//! pointer levels the mapped type absorbs.

use rustc_hash::FxHashMap;

use crate::codemodel::{AttributeDecl, CodeTypeRef, Expression};
use crate::parser::TypeRef;

/// Broad shape of a mapped type; decides how pointers and directions apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Void,
    /// Primitive value type (`int`, `double`, `Guid`)
    Value,
    String,
    /// COM interface reference (`object` or a declared interface)
    Interface,
    Struct,
    Enum,
    /// Native-sized handle or untyped pointer (`IntPtr`)
    Pointer,
    /// Already an array (`SAFEARRAY`)
    Array,
}

/// Kinds of names declared in the unit, used to categorize references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredKind {
    Interface,
    CoClass,
    Struct,
    Union,
    Enum,
}

/// Result of mapping an IDL type
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub ty: CodeTypeRef,
    pub category: TypeCategory,
    /// Marshaling attribute implied by the type (`MarshalAs(UnmanagedType.BStr)`)
    pub marshal: Option<AttributeDecl>,
    /// Pointer levels left after the type itself absorbed its own
    pub pointers: u32,
}

/// A well-known IDL type
struct Builtin {
    cs: &'static str,
    category: TypeCategory,
    /// `UnmanagedType` member for `MarshalAs`
    unmanaged: Option<&'static str>,
    /// Pointer levels already included in the name (`REFIID`, `LPWSTR`)
    implied_pointers: u32,
}

const fn value(cs: &'static str) -> Builtin {
    Builtin {
        cs,
        category: TypeCategory::Value,
        unmanaged: None,
        implied_pointers: 0,
    }
}

const fn marshaled(cs: &'static str, category: TypeCategory, unmanaged: &'static str) -> Builtin {
    Builtin {
        cs,
        category,
        unmanaged: Some(unmanaged),
        implied_pointers: 0,
    }
}

const fn string(unmanaged: &'static str) -> Builtin {
    Builtin {
        cs: "string",
        category: TypeCategory::String,
        unmanaged: Some(unmanaged),
        implied_pointers: 0,
    }
}

const fn handle(cs: &'static str) -> Builtin {
    Builtin {
        cs,
        category: TypeCategory::Pointer,
        unmanaged: None,
        implied_pointers: 0,
    }
}

fn builtin(name: &str) -> Option<Builtin> {
    let found = match name {
        "void" => Builtin {
            cs: "void",
            category: TypeCategory::Void,
            unmanaged: None,
            implied_pointers: 0,
        },
        "boolean" => marshaled("bool", TypeCategory::Value, "U1"),
        "VARIANT_BOOL" => marshaled("bool", TypeCategory::Value, "VariantBool"),
        "BOOL" => value("int"),
        "byte" | "BYTE" | "UCHAR" | "unsigned char" | "unsigned small" => value("byte"),
        "char" | "CHAR" | "signed char" | "small" | "__int8" => value("sbyte"),
        "short" | "SHORT" | "__int16" => value("short"),
        "unsigned short" | "USHORT" | "WORD" | "unsigned __int16" => value("ushort"),
        "int" | "long" | "INT" | "LONG" | "__int32" | "HRESULT" | "SCODE" | "__int3264" => {
            value("int")
        }
        "unsigned int" | "unsigned long" | "UINT" | "ULONG" | "DWORD" | "unsigned __int32"
        | "OLE_COLOR" => value("uint"),
        "hyper" | "__int64" | "LONGLONG" | "LONG64" | "INT64" => value("long"),
        "unsigned hyper" | "unsigned __int64" | "ULONGLONG" | "DWORD64" | "UINT64" => {
            value("ulong")
        }
        "float" | "FLOAT" => value("float"),
        "double" | "DOUBLE" => value("double"),
        "wchar_t" | "WCHAR" | "OLECHAR" => value("char"),
        "GUID" | "IID" | "CLSID" | "UUID" => value("Guid"),
        "REFGUID" | "REFIID" | "REFCLSID" => Builtin {
            cs: "Guid",
            category: TypeCategory::Value,
            unmanaged: None,
            implied_pointers: 1,
        },
        "DATE" => value("DateTime"),
        "DECIMAL" => value("decimal"),
        "CURRENCY" | "CY" => marshaled("decimal", TypeCategory::Value, "Currency"),
        "BSTR" => string("BStr"),
        "LPWSTR" | "LPOLESTR" | "LPCWSTR" | "LPCOLESTR" => string("LPWStr"),
        "LPSTR" | "LPCSTR" => string("LPStr"),
        "VARIANT" | "VARIANTARG" => marshaled("object", TypeCategory::Value, "Struct"),
        "IUnknown" => marshaled("object", TypeCategory::Interface, "IUnknown"),
        "IDispatch" => marshaled("object", TypeCategory::Interface, "IDispatch"),
        "HANDLE" | "HWND" | "HINSTANCE" | "HMODULE" | "HDC" | "HICON" | "HBITMAP" | "HMENU"
        | "LPVOID" | "PVOID" | "LPCVOID" | "INT_PTR" | "LONG_PTR" => handle("IntPtr"),
        "UINT_PTR" | "ULONG_PTR" | "DWORD_PTR" | "SIZE_T" => handle("UIntPtr"),
        _ => return None,
    };
    Some(found)
}

/// `VarEnum` element type for `SAFEARRAY(T)`
fn safearray_subtype(element: &str) -> Option<&'static str> {
    Some(match element {
        "BSTR" => "VT_BSTR",
        "VARIANT" => "VT_VARIANT",
        "long" | "LONG" | "int" | "INT" => "VT_I4",
        "unsigned long" | "ULONG" | "unsigned int" | "UINT" => "VT_UI4",
        "short" | "SHORT" => "VT_I2",
        "unsigned short" | "USHORT" => "VT_UI2",
        "byte" | "BYTE" | "unsigned char" => "VT_UI1",
        "double" | "DOUBLE" => "VT_R8",
        "float" | "FLOAT" => "VT_R4",
        "VARIANT_BOOL" => "VT_BOOL",
        "DATE" => "VT_DATE",
        "IUnknown" => "VT_UNKNOWN",
        "IDispatch" => "VT_DISPATCH",
        _ => return None,
    })
}

/// `[MarshalAs(UnmanagedType.X)]`
pub fn marshal_as(unmanaged: &str) -> AttributeDecl {
    AttributeDecl::new("MarshalAs").with_arg(Expression::static_field("UnmanagedType", unmanaged))
}

/// Maps IDL type references to C# using the unit's declared names and aliases
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    declared: FxHashMap<String, DeclaredKind>,
    aliases: FxHashMap<String, TypeRef>,
}

impl TypeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, kind: DeclaredKind) {
        self.declared.entry(name.to_string()).or_insert(kind);
    }

    pub fn alias(&mut self, name: &str, target: TypeRef) {
        if name != target.base_name.as_str() {
            self.aliases.entry(name.to_string()).or_insert(target);
        }
    }

    pub fn aliases(&self) -> &FxHashMap<String, TypeRef> {
        &self.aliases
    }

    /// Follow typedef aliases until a builtin, declared or unknown name.
    ///
    /// Builtins win over aliases so `typedef long HRESULT` keeps `HRESULT`
    /// semantics. Cycles stop at the first repeated name.
    pub fn resolve_alias(&self, ty: &TypeRef) -> TypeRef {
        let mut current = ty.clone();
        let mut seen: Vec<String> = Vec::new();
        while builtin(&current.base_name).is_none()
            && !self.declared.contains_key(current.base_name.as_str())
        {
            let Some(target) = self.aliases.get(current.base_name.as_str()) else {
                break;
            };
            if seen.iter().any(|s| s == current.base_name.as_str()) {
                tracing::warn!(name = %current.base_name, "typedef cycle");
                break;
            }
            seen.push(current.base_name.to_string());
            let rank = current.array_rank;
            current = target.clone();
            current.array_rank += rank;
        }
        current
    }

    /// Map a type; `string_attr` is the IDL `[string]` attribute.
    pub fn map(&self, ty: &TypeRef, string_attr: bool) -> MappedType {
        let resolved = self.resolve_alias(ty);
        let name = resolved.base_name.as_str();
        let rank = resolved.array_rank;

        if name == "SAFEARRAY" {
            let element = resolved
                .type_arguments
                .first()
                .map(|arg| self.map(arg, false))
                .unwrap_or_else(|| MappedType {
                    ty: CodeTypeRef::named("object"),
                    category: TypeCategory::Value,
                    marshal: None,
                    pointers: 0,
                });
            let mut marshal = marshal_as("SafeArray");
            let element_name = resolved
                .type_arguments
                .first()
                .map(|arg| self.resolve_alias(arg).base_name.to_string());
            if let Some(sub) = element_name.as_deref().and_then(safearray_subtype) {
                marshal = marshal.with_named_arg(
                    "SafeArraySubType",
                    Expression::static_field("VarEnum", sub),
                );
            }
            return MappedType {
                ty: element.ty.array(),
                category: TypeCategory::Array,
                marshal: Some(marshal),
                pointers: rank,
            };
        }

        if string_attr && rank > 0 && matches!(name, "char" | "CHAR" | "unsigned char") {
            return string_type("LPStr", rank - 1);
        }
        if string_attr && rank > 0 && matches!(name, "wchar_t" | "WCHAR" | "OLECHAR" | "unsigned short") {
            return string_type("LPWStr", rank - 1);
        }

        if let Some(builtin) = builtin(name) {
            let pointers = rank + builtin.implied_pointers;
            if builtin.category == TypeCategory::Void && pointers > 0 {
                return MappedType {
                    ty: CodeTypeRef::named("IntPtr"),
                    category: TypeCategory::Pointer,
                    marshal: None,
                    pointers: pointers - 1,
                };
            }
            if builtin.category == TypeCategory::Interface {
                return MappedType {
                    ty: CodeTypeRef::named(builtin.cs),
                    category: TypeCategory::Interface,
                    marshal: builtin.unmanaged.map(marshal_as),
                    pointers: pointers.saturating_sub(1),
                };
            }
            return MappedType {
                ty: CodeTypeRef::named(builtin.cs),
                category: builtin.category,
                marshal: builtin.unmanaged.map(marshal_as),
                pointers,
            };
        }

        match self.declared.get(name) {
            Some(DeclaredKind::Interface) | Some(DeclaredKind::CoClass) => MappedType {
                ty: CodeTypeRef::named(name),
                category: TypeCategory::Interface,
                marshal: None,
                pointers: rank.saturating_sub(1),
            },
            Some(DeclaredKind::Enum) => MappedType {
                ty: CodeTypeRef::named(name),
                category: TypeCategory::Enum,
                marshal: None,
                pointers: rank,
            },
            Some(DeclaredKind::Struct) | Some(DeclaredKind::Union) => MappedType {
                ty: CodeTypeRef::named(name),
                category: TypeCategory::Struct,
                marshal: None,
                pointers: rank,
            },
            None => {
                tracing::debug!(name, "unknown type name, kept as written");
                MappedType {
                    ty: CodeTypeRef::named(name),
                    category: TypeCategory::Struct,
                    marshal: None,
                    pointers: rank,
                }
            }
        }
    }
}

fn string_type(unmanaged: &str, pointers: u32) -> MappedType {
    MappedType {
        ty: CodeTypeRef::named("string"),
        category: TypeCategory::String,
        marshal: Some(marshal_as(unmanaged)),
        pointers,
    }
}
