//! C# emitter
//!
//! Renders a code-model tree into source text. The emitter is a pure
//! function of the tree and [`RenderOptions`]; it knows nothing about IDL.
//!
//! ```text
//! render(model) ─► to_compile_unit ─► render_unit
//!                                      ├── banner, using directives
//!                                      └── namespace
//!                                          └── type_decl ─► members ─► statements ─► expressions
//! ```
//!
//! The walks live in `types.rs`, `members.rs`, `stmt.rs` and `expr.rs`, each
//! adding methods to [`Emitter`].

mod error;
mod expr;
pub mod identifiers;
pub mod literals;
mod members;
mod options;
mod stmt;
mod types;
mod writer;

pub use error::ModelInvariantViolation;
pub use identifiers::{escape_identifier, escape_type_name};
pub use literals::quote_string;
pub use options::{BraceStyle, RawRenderOptions, RenderOptions};
pub use writer::CodeWriter;

use crate::codemodel::{CompileUnit, TypeDecl};
use crate::semantic::ProgramModel;

pub(crate) type Result<T = ()> = std::result::Result<T, ModelInvariantViolation>;

/// Render a program model as one C# source file.
pub fn render(model: &ProgramModel, options: &RenderOptions) -> Result<String> {
    let unit = model.to_compile_unit();
    let text = render_unit(&unit, options)?;
    tracing::debug!(
        namespace = %model.namespace_name,
        types = model.namespace.len(),
        bytes = text.len(),
        "rendered unit"
    );
    Ok(text)
}

/// Render a code-model compile unit.
pub fn render_unit(unit: &CompileUnit, options: &RenderOptions) -> Result<String> {
    let mut emitter = Emitter::new(options);
    emitter.compile_unit(unit)?;
    Ok(emitter.finish())
}

/// Render a single type declaration at the top level.
pub fn render_type(decl: &TypeDecl, options: &RenderOptions) -> Result<String> {
    let mut emitter = Emitter::new(options);
    emitter.type_decl(decl)?;
    Ok(emitter.finish())
}

/// Rendering state for one output file
pub(crate) struct Emitter<'a> {
    options: &'a RenderOptions,
    w: CodeWriter,
    /// Set while the right operand of a nested binary expression is being
    /// rendered, so deeper chains reuse the same continuation indent
    in_nested_binary: bool,
    /// Name of the type being rendered
    owner: String,
    in_interface: bool,
}

impl<'a> Emitter<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            w: CodeWriter::new(options.indent.clone()),
            in_nested_binary: false,
            owner: String::new(),
            in_interface: false,
        }
    }

    fn finish(self) -> String {
        self.w.finish()
    }

    /// Finish the current header line and open a `{` block.
    fn open_block(&mut self) {
        match self.options.brace_style {
            BraceStyle::NextLine => {
                self.w.newline();
                self.w.line("{");
            }
            BraceStyle::SameLine => self.w.line(" {"),
        }
        self.w.indent();
    }

    fn close_block(&mut self) {
        self.w.dedent();
        self.w.line("}");
    }
}
