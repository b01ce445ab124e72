//! Language-neutral code model
//!
//! The semantic pass builds this tree and the emitter renders it. Nothing in
//! here knows about IDL: types reference each other by name, members carry
//! their target-language attributes, and bodies are plain statement lists.
//!
//! ```text
//! CompileUnit
//! └── Namespace { imports, types }
//!     └── TypeDecl { kind, attrs, base_types, members }
//!         └── Member = Field | Property | Method | Constructor
//!                    | StaticConstructor | Event | Snippet | NestedType
//! ```

mod expressions;
mod members;
mod statements;
mod types;
mod unit;

pub use expressions::{BinaryOperator, Expression, Primitive, UnaryOperator};
pub use members::{
    Constructor, Direction, Event, Field, Member, Method, Parameter, Property, StaticConstructor,
};
pub use statements::{CatchClause, Statement};
pub use types::{
    AttributeArg, AttributeDecl, AttributeTarget, CodeTypeRef, DelegateSignature, Modifiers,
    TypeDecl, TypeKind, Visibility,
};
pub use unit::{CompileUnit, Namespace};
