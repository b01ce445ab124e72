//! Grammar productions for IDL
//!
//! Each module extends [`Parser`](super::parser::Parser) with the productions
//! for one part of the language:
//! - `declarations` - libraries, modules, interfaces, coclasses, typedefs, composites
//! - `attributes` - bracketed attribute lists
//! - `types` - type references, pointers and declarators
//! - `expressions` - constant expressions with C precedence

mod attributes;
mod declarations;
mod expressions;
mod types;

pub(crate) use expressions::parse_integer;
