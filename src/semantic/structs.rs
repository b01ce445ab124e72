//! Structs, unions, exceptions and `module` entry points

use crate::codemodel::{
    AttributeDecl, CodeTypeRef, Expression, Field, Member, Modifiers, TypeDecl, TypeKind,
};
use crate::parser::{ArrayDim, ExceptionDecl, FieldDecl, ModuleDecl, StructDecl, UnionDecl};

use super::builder::ModelBuilder;
use super::model::{TypeInfo, TypeModel};
use super::params::{CallStyle, MethodConverter};
use super::types::{TypeCategory, marshal_as};

/// Element types whose fixed arrays are inline strings
const CHAR_TYPES: &[&str] = &["char", "CHAR", "wchar_t", "WCHAR", "OLECHAR", "TCHAR"];

impl ModelBuilder {
    pub(super) fn convert_struct(&mut self, decl: &StructDecl) {
        let mut type_decl = TypeDecl::new(TypeKind::Struct, decl.name.as_str()).with_line(decl.line);
        type_decl.doc = self.doc_for(&decl.name, decl.line, Some(&decl.attrs));
        type_decl.preserve_member_order = true;

        let mut layout = AttributeDecl::new("StructLayout")
            .with_arg(Expression::static_field("LayoutKind", "Sequential"));
        let pack = self.ctx.options.struct_pack;
        if pack > 0 {
            layout = layout.with_named_arg("Pack", Expression::int(i64::from(pack)));
        }
        type_decl.attrs.push(layout);

        for field in &decl.fields {
            let converted = self.convert_field(field);
            type_decl.members.push(Member::Field(converted));
        }
        self.model.insert(TypeModel::new(type_decl, TypeInfo::Struct));
    }

    /// Unions keep their name and layout only; arms are not modeled.
    pub(super) fn convert_union(&mut self, decl: &UnionDecl) {
        let mut type_decl = TypeDecl::new(TypeKind::Struct, decl.name.as_str()).with_line(decl.line);
        type_decl.doc = self.doc_for(&decl.name, decl.line, Some(&decl.attrs));
        type_decl.attrs.push(
            AttributeDecl::new("StructLayout").with_arg(Expression::static_field("LayoutKind", "Explicit")),
        );
        type_decl
            .comments
            .push(format!("NOTE: union '{}' is emitted without its members", decl.name));
        self.model.insert(TypeModel::new(type_decl, TypeInfo::Union));
    }

    pub(super) fn convert_exception(&mut self, decl: &ExceptionDecl) {
        let mut type_decl = TypeDecl::new(TypeKind::Class, decl.name.as_str()).with_line(decl.line);
        type_decl.doc = self.doc_for(&decl.name, decl.line, None);
        type_decl.attrs.push(AttributeDecl::new("Serializable"));
        type_decl.base_types.push(CodeTypeRef::named("Exception"));
        for field in &decl.fields {
            let converted = self.convert_field(field);
            type_decl.members.push(Member::Field(converted));
        }
        self.model.insert(TypeModel::new(type_decl, TypeInfo::Exception));
    }

    fn convert_field(&self, field: &FieldDecl) -> Field {
        let mapped = self.mapper.map(&field.ty, field.attrs.has("string"));
        let resolved = self.mapper.resolve_alias(&field.ty);
        let mut out = Field::new(field.name.as_str(), mapped.ty.clone());
        out.doc = self.doc_for(&field.name, field.line, Some(&field.attrs));

        let fixed = fixed_size(&field.dims);
        if let Some(size) = fixed.filter(|_| mapped.pointers == 0) {
            let size = self.array_size(size);
            if CHAR_TYPES.contains(&resolved.base_name.as_str()) && resolved.array_rank == 0 {
                out.ty = CodeTypeRef::named("string");
                out.attrs
                    .push(marshal_as("ByValTStr").with_named_arg("SizeConst", size));
            } else {
                out.ty = mapped.ty.array();
                out.attrs
                    .push(marshal_as("ByValArray").with_named_arg("SizeConst", size));
            }
            return out;
        }

        let pointers = mapped.pointers + field.dims.len() as u32;
        if pointers > 0 || field.attrs.has("size_is") {
            tracing::trace!(field = %field.name, "pointer field mapped to IntPtr");
            out.ty = CodeTypeRef::named("IntPtr");
            return out;
        }
        if mapped.category != TypeCategory::Void {
            if let Some(marshal) = mapped.marshal {
                out.attrs.push(marshal);
            }
        }
        out
    }

    /// `SizeConst` value: evaluated when possible, else the converted expression
    fn array_size(&self, size: &crate::parser::Expr) -> Expression {
        let values = &self.const_values;
        let evaluated = size.evaluate(&|name: &str| values.get(name).copied());
        match evaluated {
            Some(n) => Expression::int(n),
            None => self
                .convert_value(size, &super::enums::ValueScope::Const("int".to_string()))
                .unwrap_or_else(|| Expression::snippet(size.to_string())),
        }
    }

    // =========================================================================
    // Module entry points
    // =========================================================================

    pub(super) fn convert_module_functions(&mut self, module: &ModuleDecl) {
        if module.functions.is_empty() {
            return;
        }
        let holder = module.name.to_string();
        self.ensure_holder(&holder, module.line);

        let Some(dll) = module.attrs.scalar("dllname").map(str::to_string) else {
            tracing::debug!(module = %module.name, "module without dllname, skipping entry points");
            if let Some(entry) = self.model.get_mut(&holder) {
                entry.decl.comments.push(format!(
                    "NOTE: module '{}' has no dllname; {} function(s) were not emitted",
                    module.name,
                    module.functions.len()
                ));
            }
            return;
        };

        let mut members = Vec::with_capacity(module.functions.len());
        for proto in &module.functions {
            let doc = self.doc_for(&proto.name, proto.line, Some(&proto.attrs));
            let mut converted = MethodConverter {
                mapper: &self.mapper,
                rules: &self.ctx.rules,
                diagnostics: &mut self.model.diagnostics,
            }
            .convert(proto, CallStyle::Native);
            let entry_point = proto
                .attrs
                .scalar("entry")
                .map(str::to_string)
                .unwrap_or_else(|| proto.name.to_string());
            let method = &mut converted.method;
            method.doc = doc;
            method.modifiers = Modifiers::public().with_static().with_extern();
            method.attrs.retain(|a| !a.is("DispId"));
            method.attrs.insert(
                0,
                AttributeDecl::new("DllImport")
                    .with_arg(Expression::string(dll.clone()))
                    .with_named_arg("EntryPoint", Expression::string(entry_point)),
            );
            members.push(Member::Method(converted.method));
        }
        if let Some(entry) = self.model.get_mut(&holder) {
            entry.decl.members.extend(members);
        }
    }
}

/// Size of a single fixed dimension; conformant and multi-dimensional arrays have none
fn fixed_size(dims: &[ArrayDim]) -> Option<&crate::parser::Expr> {
    match dims {
        [dim] => dim.size.as_ref(),
        _ => None,
    }
}
