//! Build configuration and context

use std::sync::Arc;

#[cfg(feature = "config")]
use serde::Deserialize;

use super::coclass::{DirectFactory, FactoryPolicy};
use super::docs::{DocLookup, NoDocs};
use super::rules::ConversionRules;

/// Options for the semantic conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Namespace for the generated file; defaults to the library name
    pub namespace: Option<String>,
    /// Holder class for constants declared outside a `module`
    pub constants_class: String,
    /// `Pack` value on sequential struct layouts
    pub struct_pack: u32,
    /// Emit the static `CoX` creator for each coclass
    pub emit_creators: bool,
    /// Namespace used when there is no library and no explicit namespace
    pub fallback_namespace: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            namespace: None,
            constants_class: "Constants".to_string(),
            struct_pack: 4,
            emit_creators: true,
            fallback_namespace: "Interop".to_string(),
        }
    }
}

/// Raw `build:` section of a YAML configuration; unset keys keep defaults.
#[cfg_attr(feature = "config", derive(Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBuildOptions {
    pub namespace: Option<String>,
    pub constants_class: Option<String>,
    pub struct_pack: Option<u32>,
    pub emit_creators: Option<bool>,
    pub fallback_namespace: Option<String>,
}

impl BuildOptions {
    #[must_use]
    pub fn from_raw(raw: &RawBuildOptions) -> Self {
        let mut options = Self::default();
        if let Some(namespace) = raw.namespace.as_ref().filter(|n| !n.trim().is_empty()) {
            options.namespace = Some(namespace.trim().to_string());
        }
        if let Some(class) = raw.constants_class.as_ref().filter(|c| !c.trim().is_empty()) {
            options.constants_class = class.trim().to_string();
        }
        if let Some(pack) = raw.struct_pack {
            // Pack must be 0 or a power of two up to 128
            if pack == 0 || (pack.is_power_of_two() && pack <= 128) {
                options.struct_pack = pack;
            } else {
                tracing::warn!(pack, "ignoring invalid struct pack");
            }
        }
        if let Some(emit) = raw.emit_creators {
            options.emit_creators = emit;
        }
        if let Some(fallback) = raw.fallback_namespace.as_ref().filter(|n| !n.trim().is_empty()) {
            options.fallback_namespace = fallback.trim().to_string();
        }
        options
    }
}

/// Everything the builder consumes besides the declaration tree.
///
/// Cheap to clone; each unit compiled in parallel gets its own copy.
#[derive(Clone)]
pub struct BuildContext {
    pub options: BuildOptions,
    pub rules: Arc<ConversionRules>,
    pub docs: Arc<dyn DocLookup>,
    pub factory: Arc<dyn FactoryPolicy>,
}

impl BuildContext {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: ConversionRules) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    pub fn with_docs(mut self, docs: Arc<dyn DocLookup>) -> Self {
        self.docs = docs;
        self
    }

    pub fn with_factory(mut self, factory: Arc<dyn FactoryPolicy>) -> Self {
        self.factory = factory;
        self
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            options: BuildOptions::default(),
            rules: Arc::new(ConversionRules::default()),
            docs: Arc::new(NoDocs),
            factory: Arc::new(DirectFactory),
        }
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("options", &self.options)
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_keeps_defaults_for_unset_keys() {
        let raw = RawBuildOptions {
            namespace: Some(" Acme.Interop ".into()),
            struct_pack: Some(3),
            ..RawBuildOptions::default()
        };
        let options = BuildOptions::from_raw(&raw);
        assert_eq!(options.namespace.as_deref(), Some("Acme.Interop"));
        assert_eq!(options.struct_pack, 4);
        assert_eq!(options.constants_class, "Constants");
        assert!(options.emit_creators);
    }
}
