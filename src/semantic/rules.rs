//! Declarative parameter rewrite rules
//!
//! Each rule is a regex match/replace applied to a parameter's type spelling
//! (`unsigned short*`) or to its name, optionally only when the parameter
//! carries a given attribute. Rules run in order before type mapping.

use regex::Regex;

#[cfg(feature = "config")]
use serde::Deserialize;

use crate::error::CompileError;
use crate::parser::{Name, Param, TypeRef};

#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTarget {
    /// The type spelling, pointer stars included
    ParamType,
    ParamName,
}

#[derive(Debug, Clone)]
pub struct ConversionRule {
    /// Only applies when the parameter has this attribute
    pub attribute: Option<String>,
    pub target: RuleTarget,
    pub pattern: Regex,
    pub replacement: String,
}

impl ConversionRule {
    pub fn new(
        attribute: Option<&str>,
        target: RuleTarget,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, CompileError> {
        let pattern = Regex::new(pattern).map_err(|e| CompileError::Config {
            message: format!("invalid rule pattern '{}': {}", pattern, e),
        })?;
        Ok(Self {
            attribute: attribute.map(str::to_string),
            target,
            pattern,
            replacement: replacement.into(),
        })
    }

    fn applies_to(&self, param: &Param) -> bool {
        self.attribute
            .as_deref()
            .is_none_or(|attribute| param.attrs.has(attribute))
    }
}

/// Ordered rule list
#[derive(Debug, Clone, Default)]
pub struct ConversionRules {
    rules: Vec<ConversionRule>,
}

impl ConversionRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: ConversionRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite a parameter in place; every matching rule applies in order.
    pub fn apply(&self, param: &mut Param) {
        for rule in &self.rules {
            if !rule.applies_to(param) {
                continue;
            }
            match rule.target {
                RuleTarget::ParamType => {
                    let spelling = param.ty.to_string();
                    if !rule.pattern.is_match(&spelling) {
                        continue;
                    }
                    let rewritten = rule.pattern.replace_all(&spelling, rule.replacement.as_str());
                    if rewritten != spelling {
                        tracing::trace!(from = %spelling, to = %rewritten, "rewrote parameter type");
                        param.ty = parse_spelling(&rewritten);
                    }
                }
                RuleTarget::ParamName => {
                    let rewritten = rule
                        .pattern
                        .replace_all(&param.name, rule.replacement.as_str())
                        .into_owned();
                    if rewritten != param.name.as_str() {
                        param.name = Name::from(rewritten);
                    }
                }
            }
        }
    }
}

/// `"LPWSTR*"` → base `LPWSTR`, rank 1
fn parse_spelling(spelling: &str) -> TypeRef {
    let trimmed = spelling.trim();
    let base = trimmed.trim_end_matches(['*', ' ']);
    let rank = trimmed[base.len()..].chars().filter(|c| *c == '*').count() as u32;
    TypeRef::named(base.trim()).with_rank(rank)
}

#[cfg(feature = "config")]
mod yaml {
    use serde::Deserialize;

    use super::{ConversionRule, ConversionRules, RuleTarget};
    use crate::error::CompileError;

    #[derive(Debug, Deserialize)]
    struct RawRules {
        #[serde(default)]
        rules: Vec<RawRule>,
    }

    #[derive(Debug, Deserialize)]
    struct RawRule {
        attribute: Option<String>,
        target: RuleTarget,
        #[serde(rename = "match")]
        pattern: String,
        replace: String,
    }

    impl ConversionRules {
        /// Load rules from YAML:
        ///
        /// ```yaml
        /// rules:
        ///   - attribute: string
        ///     target: param_type
        ///     match: '^unsigned short\*$'
        ///     replace: LPWSTR
        /// ```
        pub fn from_yaml(text: &str) -> Result<Self, CompileError> {
            let raw: RawRules = serde_yaml::from_str(text).map_err(|e| CompileError::Config {
                message: e.to_string(),
            })?;
            let mut rules = ConversionRules::new();
            for rule in raw.rules {
                rules.push(ConversionRule::new(
                    rule.attribute.as_deref(),
                    rule.target,
                    &rule.pattern,
                    rule.replace,
                )?);
            }
            Ok(rules)
        }
    }
}
