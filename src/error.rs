//! Fatal errors for a compilation unit.

use std::path::PathBuf;

use thiserror::Error;

use crate::emit::ModelInvariantViolation;

/// Errors that stop a unit from producing output.
///
/// Syntax and semantic problems are not errors in this sense; they are
/// returned as diagnostics next to the output.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Reading an input or writing an output failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file that is not IDL source.
    #[error("Unsupported file extension: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    /// The emitter found an inconsistent code model.
    #[error("Model invariant violated: {0}")]
    Invariant(#[from] ModelInvariantViolation),

    /// A configuration file could not be used.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CompileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
