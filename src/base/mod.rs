//! Foundation types for the comidl toolchain.
//!
//! This module provides the source-position types used throughout the compiler:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Position`] - Line/column positions for declarations and diagnostics
//!
//! This module has NO dependencies on other comidl modules.

mod position;
mod span;

pub use position::Position;
pub use span::{LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
