use crate::helpers::{assert_in_order, block, translate};

const COMMENTED: &str = r#"
/*
 * acme.idl
 * Generated interfaces for the Acme runtime.
 */
import "oaidl.idl"; /* base types */

/** Flags for IWidget. */
enum WidgetFlags { WF_NONE = 0 /* no flags */, WF_SHOWN = 1 };

[uuid(0A0B0C0D-0000-0000-0000-000000000040)]
interface IWidget : IUnknown {
    HRESULT Show(/* in */ [in] long flags);
};
"#;

#[test]
fn test_block_comments_are_skipped() {
    let translation = translate(COMMENTED);
    assert!(translation.syntax_errors.is_empty(), "{:?}", translation.syntax_errors);
    assert_in_order(
        &translation.source,
        &[
            "public enum WidgetFlags",
            "WF_NONE = 0,",
            "WF_SHOWN = 1,",
            "public interface IWidget",
            "void Show(int flags);",
        ],
    );
}

#[test]
fn test_union_becomes_explicit_layout_struct() {
    let source = translate("typedef union tagNUM { long l; double d; } NUM;").source;
    assert_in_order(
        &source,
        &[
            "// NOTE: union 'NUM' is emitted without its members",
            "[StructLayout(LayoutKind.Explicit)]",
            "public struct NUM",
        ],
    );
    let body = block(&source, "public struct NUM").join("\n");
    assert!(!body.contains("public int l;"), "{}", body);
}

#[test]
fn test_exception_becomes_serializable_class() {
    let source = translate("exception Failure { long code; BSTR reason; };").source;
    assert_in_order(&source, &["[Serializable]", "public class Failure : Exception"]);
    let body = block(&source, "public class Failure : Exception").join("\n");
    assert_in_order(&body, &["public int code;", "public string reason;"]);
}

#[test]
fn test_string_constant_escapes_quotes() {
    let source = translate(r#"const LPSTR GREETING = "it's \"ok\"";"#).source;
    assert!(
        source.contains(r#"public const string GREETING = "it\'s \"ok\"";"#),
        "{}",
        source
    );
}

#[test]
fn test_negated_enum_values_stay_valid() {
    let source = translate("enum E { A = -(-1), B = -(0x80000000), C = -2 };").source;
    assert!(source.contains("A = -(-1),"), "{}", source);
    assert!(source.contains("B = -2147483648,"), "{}", source);
    assert!(source.contains("C = -2,"), "{}", source);
    assert!(!source.contains("--"), "{}", source);
}

#[test]
fn test_coclass_stubs_overloads_from_both_interfaces() {
    let translation = translate(
        "interface IA : IUnknown { HRESULT Go([in] long a); };
         interface IB : IUnknown { HRESULT Go([in] BSTR b); };
         coclass C { [default] interface IA; interface IB; };",
    );
    let object = block(&translation.source, "public class _CClass : IA, IB, C").join("\n");
    assert_eq!(object.matches("public virtual extern void Go(").count(), 2, "{}", object);
    assert!(object.contains("void Go(int a);"));
    assert!(object.contains("string b);"));
    assert!(translation.diagnostics.is_empty(), "{:?}", translation.diagnostics);
}
