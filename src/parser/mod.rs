//! Hand-written recursive descent parser for IDL
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser (grammar/*) → DeclarationTree + SyntaxErrors
//! ```
//!
//! Trivia is dropped before parsing. The parser never fails outright: a
//! malformed declaration is recorded and skipped, and ambiguous constructs are
//! resolved by speculative parsing that rewinds on failure.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
mod grammar;
pub mod keywords;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use errors::{ErrorCode, Severity, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, compile, parse};
pub use syntax_kind::SyntaxKind;

pub(crate) use grammar::parse_integer;
