use comidl::{RenderOptions, Translator};
use comidl::emit::BraceStyle;

use crate::helpers::fixtures::IFOO_BAR;
use crate::helpers::plain_options;

fn render_with(options: RenderOptions) -> String {
    Translator::new()
        .with_render_options(options)
        .translate(IFOO_BAR)
        .unwrap_or_else(|e| panic!("translation failed: {}", e))
        .source
}

#[test]
fn test_default_header_banner() {
    let source = render_with(RenderOptions::default());
    assert!(source.starts_with(
        "//------------------------------------------------------------------------------\n\
         // <auto-generated>\n\
         //     This code was generated by comidl.\n\
         // </auto-generated>\n\
         //------------------------------------------------------------------------------\n\
         \n\
         using System;\n"
    ));
}

#[test]
fn test_same_line_braces() {
    let source = render_with(RenderOptions {
        brace_style: BraceStyle::SameLine,
        ..plain_options()
    });
    assert!(source.contains("namespace Interop {\n"), "{}", source);
    assert!(source.contains("    public interface IFoo {\n"));
    assert!(source.contains("        int Bar {\n"));
}

#[test]
fn test_tab_indentation() {
    let source = render_with(RenderOptions {
        indent: "\t".to_string(),
        ..plain_options()
    });
    assert!(source.contains("\tpublic interface IFoo\n\t{\n\t\tint Bar\n"), "{}", source);
}

#[test]
fn test_output_ends_with_single_newline() {
    let source = render_with(plain_options());
    assert!(source.ends_with("}\n"));
    assert!(!source.ends_with("\n\n"));
}
