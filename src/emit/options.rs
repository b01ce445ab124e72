//! Rendering options

#[cfg(feature = "config")]
use serde::Deserialize;

/// Where opening braces go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum BraceStyle {
    /// `{` on its own line
    #[default]
    NextLine,
    /// `{` at the end of the declaration line
    SameLine,
}

/// Options for rendering a code model to C# text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// One level of indentation
    pub indent: String,
    pub brace_style: BraceStyle,
    /// Blank line between members of a type
    pub blank_lines_between_members: bool,
    /// Keep members in model order instead of grouping them by kind
    pub verbatim_order: bool,
    /// Text of the `<auto-generated>` banner; `None` omits the banner
    pub header_comment: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            brace_style: BraceStyle::NextLine,
            blank_lines_between_members: true,
            verbatim_order: false,
            header_comment: Some("This code was generated by comidl.".to_string()),
        }
    }
}

/// Raw `render:` section of a YAML configuration; unset keys keep defaults.
#[cfg_attr(feature = "config", derive(Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRenderOptions {
    /// Number of spaces per level; ignored when `use_tabs` is set
    pub indent_width: Option<usize>,
    pub use_tabs: Option<bool>,
    pub brace_style: Option<BraceStyle>,
    pub blank_lines_between_members: Option<bool>,
    pub verbatim_order: Option<bool>,
    pub header_comment: Option<String>,
}

impl RenderOptions {
    #[must_use]
    pub fn from_raw(raw: &RawRenderOptions) -> Self {
        let mut options = Self::default();
        if raw.use_tabs == Some(true) {
            options.indent = "\t".to_string();
        } else if let Some(width) = raw.indent_width {
            if (1..=16).contains(&width) {
                options.indent = " ".repeat(width);
            } else {
                tracing::warn!(width, "ignoring out of range indent width");
            }
        }
        if let Some(style) = raw.brace_style {
            options.brace_style = style;
        }
        if let Some(blank) = raw.blank_lines_between_members {
            options.blank_lines_between_members = blank;
        }
        if let Some(verbatim) = raw.verbatim_order {
            options.verbatim_order = verbatim;
        }
        if let Some(header) = &raw.header_comment {
            // An empty header turns the banner off
            options.header_comment = (!header.trim().is_empty()).then(|| header.clone());
        }
        options
    }
}
