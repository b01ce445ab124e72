use crate::helpers::{assert_in_order, translate};

#[test]
fn test_malformed_top_level_declaration_is_skipped() {
    let translation = translate(
        "interface IA { HRESULT F(); };
         42 garbage;
         interface IC { HRESULT G(); };",
    );
    assert!(!translation.syntax_errors.is_empty());
    assert!(translation.has_errors());
    assert_in_order(
        &translation.source,
        &["public interface IA", "void F();", "public interface IC", "void G();"],
    );
}

#[test]
fn test_malformed_member_keeps_the_rest_of_the_interface() {
    let translation = translate(
        "interface IBroken {
             HRESULT Good();
             HRESULT ( ;
             HRESULT Also([in] long x);
         };",
    );
    assert!(!translation.syntax_errors.is_empty());
    assert_eq!(translation.syntax_errors[0].line, 3);
    assert_in_order(
        &translation.source,
        &["public interface IBroken", "void Good();", "void Also(int x);"],
    );
}

#[test]
fn test_cast_and_parenthesized_operand() {
    let source = translate(
        "const long NEG = (long) - 1;
         enum E { E_ONE = 1, E_ZERO = (E_ONE) - 1 };",
    )
    .source;
    assert!(source.contains("public const int NEG = ((int)(-1));"), "{}", source);
    assert!(source.contains("E_ZERO = (E_ONE - 1),"), "{}", source);
}

#[test]
fn test_empty_input_still_renders_a_namespace() {
    let translation = translate("");
    assert!(translation.syntax_errors.is_empty());
    assert!(translation.source.contains("namespace Interop\n{\n}"), "{}", translation.source);
}
