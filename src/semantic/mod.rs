//! Semantic conversion: declaration tree → program model
//!
//! ```text
//! DeclarationTree
//!   → ModelBuilder::build
//!       prescan        (types.rs: declare names, aliases)
//!       visit          (interfaces.rs, coclass.rs, enums.rs, structs.rs)
//!         methods      (params.rs → properties.rs)
//!       enum fixup     (enums.rs)
//!   → ProgramModel     (model.rs)
//! ```

mod builder;
pub mod coclass;
pub mod diagnostics;
mod docs;
mod enums;
mod interfaces;
pub mod model;
pub mod options;
mod params;
mod properties;
mod structs;
pub mod rules;
pub mod types;

pub use builder::ModelBuilder;
pub use coclass::{DirectFactory, FactoryPolicy, StaThreadGuard};
pub use diagnostics::{Diagnostics, SemanticError, codes};
pub use docs::{DocLookup, DocTable, NoDocs};
pub use interfaces::{eliminate_redundant_bases, flatten_members};
pub use model::{InterfaceInfo, InterfaceKind, ProgramModel, TypeInfo, TypeModel};
pub use options::{BuildContext, BuildOptions, RawBuildOptions};
pub use params::{CallStyle, ConvertedMethod, PropKind};
pub use properties::synthesize;
pub use rules::{ConversionRule, ConversionRules, RuleTarget};
pub use types::{DeclaredKind, MappedType, TypeCategory, TypeMapper};

use crate::parser::DeclarationTree;

/// Convert a parsed unit with default options.
pub fn build(tree: &DeclarationTree) -> ProgramModel {
    ModelBuilder::new(BuildContext::default()).build(tree)
}
