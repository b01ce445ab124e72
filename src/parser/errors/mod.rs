//! Parser error handling module
//!
//! This module provides error handling for the IDL parser:
//! - Categorized error codes for filtering and documentation
//! - Expected/found token sets for every failure
//! - Suggestions/hints for common mistakes

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{Severity, SyntaxError};
