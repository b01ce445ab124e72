//! Compile units, namespaces and type declarations

use crate::codemodel::{CompileUnit, Member, Namespace, TypeDecl, TypeKind};

use super::{Emitter, ModelInvariantViolation, Result};

const BANNER_RULE: &str =
    "//------------------------------------------------------------------------------";

impl Emitter<'_> {
    pub(super) fn compile_unit(&mut self, unit: &CompileUnit) -> Result {
        if let Some(header) = &self.options.header_comment {
            self.w.line(BANNER_RULE);
            self.w.line("// <auto-generated>");
            for line in header.lines() {
                let line = format!("//     {}", line);
                self.w.line(line.trim_end());
            }
            self.w.line("// </auto-generated>");
            self.w.line(BANNER_RULE);
            self.w.blank_line();
        }

        let mut imports: Vec<&str> = Vec::new();
        for namespace in &unit.namespaces {
            for import in &namespace.imports {
                if !imports.contains(&import.as_str()) {
                    imports.push(import);
                }
            }
        }
        for import in &imports {
            self.w.line(&format!("using {};", import));
        }
        if !imports.is_empty() {
            self.w.blank_line();
        }

        if !unit.assembly_attrs.is_empty() {
            self.attribute_lines(&unit.assembly_attrs, None)?;
            self.w.blank_line();
        }

        for (i, namespace) in unit.namespaces.iter().enumerate() {
            if i > 0 {
                self.w.blank_line();
            }
            self.namespace(namespace)?;
        }
        Ok(())
    }

    fn namespace(&mut self, namespace: &Namespace) -> Result {
        let named = !namespace.name.is_empty();
        if named {
            self.w.write("namespace ");
            self.w.write(&namespace.name);
            self.open_block();
        }

        for comment in &namespace.comments {
            self.comment_lines("//", comment);
        }
        for (i, decl) in namespace.types.iter().enumerate() {
            if i > 0 || !namespace.comments.is_empty() {
                self.w.blank_line();
            }
            self.type_decl(decl)?;
        }

        if named {
            self.close_block();
        }
        Ok(())
    }

    pub(super) fn type_decl(&mut self, decl: &TypeDecl) -> Result {
        if decl.name.is_empty() {
            return Err(ModelInvariantViolation::empty_identifier("type", self.owner.clone()));
        }
        let saved_owner = std::mem::replace(&mut self.owner, decl.name.clone());
        let saved_interface = std::mem::replace(&mut self.in_interface, false);
        let name = self.identifier(&decl.name, "type")?;

        self.doc(decl.doc.as_deref());
        for comment in &decl.comments {
            self.comment_lines("//", comment);
        }
        self.attribute_lines(&decl.attrs, None)?;

        if decl.kind == TypeKind::Delegate {
            let signature = decl
                .signature
                .as_ref()
                .ok_or_else(|| ModelInvariantViolation::MissingSignature(decl.name.clone()))?;
            self.modifiers(&decl.modifiers);
            self.w.write("delegate ");
            self.type_ref(&signature.return_type)?;
            self.w.write(" ");
            self.w.write(&name);
            self.parameters(&signature.parameters)?;
            self.w.line(";");
        } else {
            self.modifiers(&decl.modifiers);
            self.w.write(decl.kind.keyword());
            self.w.write(" ");
            self.w.write(&name);
            if !decl.type_parameters.is_empty() {
                self.w.write("<");
                self.w.write(&decl.type_parameters.join(", "));
                self.w.write(">");
            }
            if !decl.base_types.is_empty() {
                self.w.write(" : ");
                for (i, base) in decl.base_types.iter().enumerate() {
                    if i > 0 {
                        self.w.write(", ");
                    }
                    self.type_ref(base)?;
                }
            }
            self.open_block();
            self.in_interface = decl.kind == TypeKind::Interface;
            self.type_members(decl)?;
            self.close_block();
        }

        self.owner = saved_owner;
        self.in_interface = saved_interface;
        Ok(())
    }

    fn type_members(&mut self, decl: &TypeDecl) -> Result {
        if decl.kind == TypeKind::Enum {
            for member in &decl.members {
                match member {
                    Member::Field(field) => self.enum_member(field)?,
                    other => tracing::warn!(
                        owner = %decl.name,
                        member = ?other.name(),
                        "non-field member in enum skipped"
                    ),
                }
            }
            return Ok(());
        }

        let mut members: Vec<&Member> = decl.members.iter().collect();
        if !self.options.verbatim_order && !decl.preserve_member_order {
            members.sort_by_key(|member| member.order_rank());
        }
        for (i, member) in members.into_iter().enumerate() {
            if i > 0 && self.options.blank_lines_between_members {
                self.w.blank_line();
            }
            self.member(member)?;
        }
        Ok(())
    }
}
