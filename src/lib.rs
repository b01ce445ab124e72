//! # comidl
//!
//! Translator from COM IDL to C# interop source.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project    → File discovery, parallel compilation
//!   ↓
//! translator → parse + build + render in one call
//!   ↓
//! emit       → C# renderer for the code model
//!   ↓
//! semantic   → Declarations → program model (interfaces, coclasses, enums, ...)
//!   ↓
//! codemodel  → Language-neutral types, members, statements, expressions
//!   ↓
//! parser     → Logos lexer, recursive-descent parser, declaration tree
//!   ↓
//! base       → Text positions and line index
//! ```
//!
//! ## Example
//!
//! ```
//! let translation = comidl::Translator::new()
//!     .translate("[uuid(6b29fc40-ca47-1067-b31d-00dd010662da)] interface IFoo : IUnknown { [propget] HRESULT Bar([out, retval] long* value); };")
//!     .unwrap();
//! assert!(translation.source.contains("int Bar"));
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → codemodel → semantic → emit → project)
// ============================================================================

/// Foundation types: TextRange, LineIndex, Position
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, declaration tree
pub mod parser;

/// Code model: the emitter's input tree
pub mod codemodel;

/// Semantic conversion: declarations → program model
pub mod semantic;

/// C# rendering of the code model
pub mod emit;

/// File discovery and parallel compilation
pub mod project;

/// Crate-level fatal errors
pub mod error;

mod translator;

pub use error::CompileError;
pub use translator::{Translation, Translator};

// Re-export the pipeline entry points
pub use emit::{ModelInvariantViolation, RenderOptions, render};
pub use parser::{DeclarationTree, SyntaxError, parse};
pub use semantic::{BuildContext, BuildOptions, Diagnostics, ProgramModel, SemanticError};

// Re-export foundation types
pub use base::{LineIndex, Position, TextRange, TextSize};
