use std::sync::Arc;

use comidl::Translator;
use comidl::semantic::{BuildContext, DocTable};

use crate::helpers::{assert_in_order, plain_options};

const SOURCE: &str = r#"
[helpstring("Counts things")]
interface ICounter : IUnknown {
    HRESULT Reset();
    [helpstring("Adds <n> & more")] HRESULT Add([in] long n);
};
"#;

fn render_with_docs(docs: DocTable) -> String {
    Translator::new()
        .with_context(BuildContext::default().with_docs(Arc::new(docs)))
        .with_render_options(plain_options())
        .translate(SOURCE)
        .unwrap_or_else(|e| panic!("translation failed: {}", e))
        .source
}

#[test]
fn test_helpstring_becomes_summary() {
    let source = render_with_docs(DocTable::new());
    assert_in_order(
        &source,
        &[
            "/// <summary>",
            "/// Counts things",
            "/// </summary>",
            "public interface ICounter",
            "/// Adds &lt;n&gt; &amp; more",
            "void Add(int n);",
        ],
    );
}

#[test]
fn test_external_docs_win_and_comment_text_is_spliced_verbatim() {
    let mut docs = DocTable::new();
    docs.insert("ICounter", "/// <summary>Counter from the docs database</summary>");
    docs.insert_at("Reset", 4, "Start again");
    docs.insert_at("Reset", 99, "wrong line");
    let source = render_with_docs(docs);
    assert!(!source.contains("Counts things"));
    assert_in_order(
        &source,
        &[
            "    /// <summary>Counter from the docs database</summary>\n    [ComImport]",
            "public interface ICounter",
            "/// Start again",
            "void Reset();",
        ],
    );
    assert!(!source.contains("wrong line"));
}
