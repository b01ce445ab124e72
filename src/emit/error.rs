//! Code-model inconsistencies found while rendering.

use thiserror::Error;

/// A code-model invariant the builder should have upheld.
///
/// Rendering stops at the first violation; the text rendered so far is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelInvariantViolation {
    /// A declaration or reference with an empty name.
    #[error("Empty identifier for {kind} in '{owner}'")]
    EmptyIdentifier { kind: &'static str, owner: String },

    /// A type reference with an empty name.
    #[error("Empty type name in '{owner}'")]
    EmptyTypeName { owner: String },

    /// A property rendered with neither a getter nor a setter.
    #[error("Property '{name}' in '{owner}' has no accessors")]
    PropertyWithoutAccessors { name: String, owner: String },

    /// A delegate type without a signature.
    #[error("Delegate '{0}' has no signature")]
    MissingSignature(String),
}

impl ModelInvariantViolation {
    pub fn empty_identifier(kind: &'static str, owner: impl Into<String>) -> Self {
        Self::EmptyIdentifier {
            kind,
            owner: owner.into(),
        }
    }

    pub fn empty_type_name(owner: impl Into<String>) -> Self {
        Self::EmptyTypeName { owner: owner.into() }
    }
}
