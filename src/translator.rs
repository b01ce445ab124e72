//! One-call IDL → C# translation

use crate::emit::{self, RenderOptions};
use crate::error::CompileError;
use crate::parser::{self, SyntaxError};
use crate::semantic::{BuildContext, BuildOptions, Diagnostics, ModelBuilder, ProgramModel};

/// Result of translating one unit
#[derive(Debug, Clone)]
pub struct Translation {
    /// The generated C# file
    pub source: String,
    /// Namespace the types were emitted into
    pub namespace: String,
    /// Declarations the parser skipped
    pub syntax_errors: Vec<SyntaxError>,
    /// Recoverable problems found while converting
    pub diagnostics: Diagnostics,
}

impl Translation {
    /// True when any syntax or semantic error (not warning) was recorded
    pub fn has_errors(&self) -> bool {
        self.syntax_errors.iter().any(|e| e.severity.is_error()) || self.diagnostics.error_count() > 0
    }
}

/// Parser, builder and emitter wired together with one configuration.
///
/// Cheap to share between threads; each call builds its own model.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    pub context: BuildContext,
    pub render: RenderOptions,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.context.options = options;
        self
    }

    pub fn with_context(mut self, context: BuildContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Parse and convert without rendering.
    pub fn build(&self, text: &str) -> (ProgramModel, Vec<SyntaxError>) {
        let parse = parser::parse(text);
        for error in &parse.errors {
            tracing::debug!(line = error.line, code = ?error.code, "{}", error.message);
        }
        let model = ModelBuilder::new(self.context.clone()).build(&parse.tree);
        (model, parse.errors)
    }

    /// Translate IDL text into a C# file.
    ///
    /// Syntax and semantic problems are returned with the output; only a
    /// code-model inconsistency fails the call.
    pub fn translate(&self, text: &str) -> Result<Translation, CompileError> {
        let (model, syntax_errors) = self.build(text);
        let source = emit::render(&model, &self.render)?;
        Ok(Translation {
            source,
            namespace: model.namespace_name,
            syntax_errors,
            diagnostics: model.diagnostics,
        })
    }
}

#[cfg(feature = "config")]
mod yaml {
    use serde::Deserialize;

    use super::Translator;
    use crate::emit::{RawRenderOptions, RenderOptions};
    use crate::error::CompileError;
    use crate::semantic::{BuildOptions, ConversionRules, RawBuildOptions};

    #[derive(Debug, Default, Deserialize)]
    struct RawConfig {
        #[serde(default)]
        build: RawBuildOptions,
        #[serde(default)]
        render: RawRenderOptions,
    }

    impl Translator {
        /// Configure from YAML with optional `build:`, `render:` and `rules:`
        /// sections.
        pub fn from_yaml(text: &str) -> Result<Self, CompileError> {
            let raw: RawConfig =
                serde_yaml::from_str(text).map_err(|e| CompileError::config(e.to_string()))?;
            let rules = ConversionRules::from_yaml(text)?;
            let mut translator = Translator::new()
                .with_options(BuildOptions::from_raw(&raw.build))
                .with_render_options(RenderOptions::from_raw(&raw.render));
            translator.context = translator.context.with_rules(rules);
            Ok(translator)
        }
    }
}
