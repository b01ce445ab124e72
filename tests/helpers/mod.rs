//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod fixtures;

use comidl::{RenderOptions, Translation, Translator};

/// Render options without the generated-file banner, so expected text stays short.
pub fn plain_options() -> RenderOptions {
    RenderOptions {
        header_comment: None,
        ..RenderOptions::default()
    }
}

pub fn translator() -> Translator {
    Translator::new().with_render_options(plain_options())
}

/// Translate a source string, failing the test on a fatal error.
pub fn translate(source: &str) -> Translation {
    translator()
        .translate(source)
        .unwrap_or_else(|e| panic!("translation failed: {}", e))
}

/// Translate and return only the generated C#.
pub fn render(source: &str) -> String {
    translate(source).source
}

/// Assert every needle occurs in `haystack`, in the given order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match haystack[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!(
                "expected '{}' after offset {} in:\n{}",
                needle, from, haystack
            ),
        }
    }
}

/// The lines of the block that starts with `header`, up to its closing brace.
pub fn block<'a>(text: &'a str, header: &str) -> Vec<&'a str> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| l.trim_end().ends_with(header)) else {
        panic!("no line ending with '{}' in:\n{}", header, text);
    };
    let indent = lines[start].len() - lines[start].trim_start().len();
    let closing = " ".repeat(indent) + "}";
    let end = lines[start..]
        .iter()
        .position(|l| *l == closing)
        .map(|offset| start + offset)
        .unwrap_or(lines.len() - 1);
    lines[start..=end].to_vec()
}
