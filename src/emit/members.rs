//! Member rendering

use crate::codemodel::{
    AttributeDecl, AttributeTarget, Constructor, Event, Field, Member, Method, Modifiers,
    Parameter, Property, StaticConstructor, Visibility,
};

use super::{Emitter, ModelInvariantViolation, Result};

impl Emitter<'_> {
    pub(super) fn member(&mut self, member: &Member) -> Result {
        match member {
            Member::Field(field) => self.field(field),
            Member::Property(property) => self.property(property),
            Member::Method(method) => self.method(method),
            Member::Constructor(ctor) => self.constructor(ctor),
            Member::StaticConstructor(ctor) => self.static_constructor(ctor),
            Member::Event(event) => self.event(event),
            Member::Snippet(lines) => {
                for line in lines {
                    if line.is_empty() {
                        self.w.blank_line();
                    } else {
                        self.w.line(line);
                    }
                }
                Ok(())
            }
            Member::NestedType(decl) => self.type_decl(decl),
        }
    }

    // =========================================================================
    // Shared pieces
    // =========================================================================

    /// Documentation above a declaration.
    ///
    /// Text that is already comment lines is spliced as is; anything else is
    /// wrapped in a `<summary>` element.
    pub(super) fn doc(&mut self, doc: Option<&str>) {
        let Some(doc) = doc else {
            return;
        };
        let lines: Vec<&str> = doc.lines().map(str::trim).collect();
        if lines.iter().all(|line| line.starts_with("//")) {
            for line in lines {
                self.w.line(line);
            }
            return;
        }
        self.w.line("/// <summary>");
        for line in lines {
            if line.is_empty() {
                self.w.line("///");
            } else {
                self.w.line(&format!("/// {}", xml_escape(line)));
            }
        }
        self.w.line("/// </summary>");
    }

    /// Attributes on their own lines; `target` applies when the attribute
    /// carries none of its own.
    pub(super) fn attribute_lines(
        &mut self,
        attrs: &[AttributeDecl],
        target: Option<AttributeTarget>,
    ) -> Result {
        for attr in attrs {
            self.w.write("[");
            if let Some(target) = attr.target.or(target) {
                self.w.write(target.as_str());
                self.w.write(": ");
            }
            self.attribute(attr)?;
            self.w.line("]");
        }
        Ok(())
    }

    /// `Name(args)` without brackets
    fn attribute(&mut self, attr: &AttributeDecl) -> Result {
        if attr.name.is_empty() {
            return Err(ModelInvariantViolation::empty_identifier("attribute", self.owner.clone()));
        }
        self.w.write(&attr.name);
        if attr.args.is_empty() {
            return Ok(());
        }
        self.w.write("(");
        for (i, arg) in attr.args.iter().enumerate() {
            if i > 0 {
                self.w.write(", ");
            }
            if let Some(name) = &arg.name {
                self.w.write(name);
                self.w.write(" = ");
            }
            self.expression(&arg.value)?;
        }
        self.w.write(")");
        Ok(())
    }

    /// Modifier keywords followed by a space; interface members never
    /// carry an access keyword.
    pub(super) fn modifiers(&mut self, modifiers: &Modifiers) {
        let mut modifiers = *modifiers;
        if self.in_interface {
            modifiers.visibility = None;
        }
        for keyword in modifiers.keywords() {
            self.w.write(keyword);
            self.w.write(" ");
        }
    }

    pub(super) fn parameters(&mut self, parameters: &[Parameter]) -> Result {
        self.w.write("(");
        for (i, param) in parameters.iter().enumerate() {
            if i > 0 {
                self.w.write(", ");
            }
            if !param.attrs.is_empty() {
                self.w.write("[");
                for (j, attr) in param.attrs.iter().enumerate() {
                    if j > 0 {
                        self.w.write(", ");
                    }
                    self.attribute(attr)?;
                }
                self.w.write("] ");
            }
            self.direction_prefix(param.direction);
            self.type_ref(&param.ty)?;
            let name = self.identifier(&param.name, "parameter")?;
            self.w.write(" ");
            self.w.write(&name);
        }
        self.w.write(")");
        Ok(())
    }

    fn note_comments(&mut self, comments: &[String]) {
        for comment in comments {
            self.comment_lines("//", comment);
        }
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn field(&mut self, field: &Field) -> Result {
        let name = self.identifier(&field.name, "field")?;
        self.doc(field.doc.as_deref());
        self.attribute_lines(&field.attrs, None)?;
        self.modifiers(&field.modifiers);
        self.type_ref(&field.ty)?;
        self.w.write(" ");
        self.w.write(&name);
        if let Some(init) = &field.initializer {
            self.w.write(" = ");
            self.expression(init)?;
        }
        self.w.line(";");
        Ok(())
    }

    /// `Name = value,` inside an enum body
    pub(super) fn enum_member(&mut self, field: &Field) -> Result {
        let name = self.identifier(&field.name, "enum member")?;
        self.doc(field.doc.as_deref());
        self.attribute_lines(&field.attrs, None)?;
        self.w.write(&name);
        if let Some(init) = &field.initializer {
            self.w.write(" = ");
            self.expression(init)?;
        }
        self.w.line(",");
        Ok(())
    }

    fn property(&mut self, property: &Property) -> Result {
        let name = self.identifier(&property.name, "property")?;
        if !property.has_get && !property.has_set {
            return Err(ModelInvariantViolation::PropertyWithoutAccessors {
                name: property.name.clone(),
                owner: self.owner.clone(),
            });
        }
        self.doc(property.doc.as_deref());
        self.attribute_lines(&property.attrs, None)?;
        self.modifiers(&property.modifiers);
        self.type_ref(&property.ty)?;
        self.w.write(" ");
        self.w.write(&name);
        self.open_block();

        let stubs = self.in_interface || property.modifiers.is_abstract || property.modifiers.is_extern;
        if property.has_get {
            self.attribute_lines(&property.get_attrs, None)?;
            match property.get_body.as_deref().filter(|_| !stubs) {
                Some(body) => {
                    self.w.write("get");
                    self.block(body)?;
                }
                None => self.w.line("get;"),
            }
        }
        if property.has_set {
            self.attribute_lines(&property.set_attrs, None)?;
            match property.set_body.as_deref().filter(|_| !stubs) {
                Some(body) => {
                    self.w.write("set");
                    self.block(body)?;
                }
                None => self.w.line("set;"),
            }
        }
        self.close_block();
        Ok(())
    }

    fn method(&mut self, method: &Method) -> Result {
        let name = self.identifier(&method.name, "method")?;
        self.doc(method.doc.as_deref());
        self.note_comments(&method.comments);
        self.attribute_lines(&method.attrs, None)?;
        self.attribute_lines(&method.return_attrs, Some(AttributeTarget::Return))?;
        self.modifiers(&method.modifiers);
        self.type_ref(&method.return_type)?;
        self.w.write(" ");
        self.w.write(&name);
        self.parameters(&method.parameters)?;
        match &method.body {
            Some(body) if !self.in_interface => self.block(body)?,
            _ => self.w.line(";"),
        }
        Ok(())
    }

    fn constructor(&mut self, ctor: &Constructor) -> Result {
        let name = self.identifier(&self.owner, "constructor")?;
        self.doc(ctor.doc.as_deref());
        self.attribute_lines(&ctor.attrs, None)?;
        self.modifiers(&ctor.modifiers);
        self.w.write(&name);
        self.parameters(&ctor.parameters)?;
        if let Some(args) = &ctor.base_args {
            self.w.write(" : base(");
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    self.w.write(", ");
                }
                self.expression(arg)?;
            }
            self.w.write(")");
        }
        match &ctor.body {
            Some(body) => self.block(body)?,
            None => self.w.line(";"),
        }
        Ok(())
    }

    fn static_constructor(&mut self, ctor: &StaticConstructor) -> Result {
        let name = self.identifier(&self.owner, "static constructor")?;
        self.w.write("static ");
        self.w.write(&name);
        self.w.write("()");
        self.block(&ctor.body)
    }

    fn event(&mut self, event: &Event) -> Result {
        let name = self.identifier(&event.name, "event")?;
        self.doc(event.doc.as_deref());
        self.attribute_lines(&event.attrs, None)?;
        let mut modifiers = event.modifiers;
        if modifiers.visibility.is_none() && !self.in_interface {
            modifiers.visibility = Some(Visibility::Public);
        }
        self.modifiers(&modifiers);
        self.w.write("event ");
        self.type_ref(&event.ty)?;
        self.w.write(" ");
        self.w.write(&name);
        self.w.line(";");
        Ok(())
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
