#![allow(clippy::unwrap_used)]

use crate::helpers::{block, render, translate};

#[test]
fn test_enum_values_and_self_references() {
    let source = render(
        "typedef enum { SK_CIRCLE = 1, SK_SQUARE, SK_ALL = SK_CIRCLE | SK_SQUARE } ShapeKind;",
    );
    let lines: Vec<String> = block(&source, "public enum ShapeKind")
        .iter()
        .map(|l| l.trim().to_string())
        .collect();
    assert_eq!(
        lines,
        vec![
            "public enum ShapeKind",
            "{",
            "SK_CIRCLE = 1,",
            "SK_SQUARE,",
            "SK_ALL = (SK_CIRCLE | SK_SQUARE),",
            "}",
        ]
    );
}

#[test]
fn test_forward_enum_reference_is_fixed_up() {
    let source = render(
        "enum A { A_FIRST = B_SECOND + 1 };
         enum B { B_FIRST, B_SECOND = 4 };",
    );
    assert!(
        source.contains("A_FIRST = (((int)(B.B_SECOND)) + 1),"),
        "{}",
        source
    );
    assert!(source.contains("B_SECOND = 4,"));
}

#[test]
fn test_unresolved_reference_is_kept_as_text() {
    let translation = translate("enum E { E_X = NOWHERE | 1 };");
    assert!(translation.source.contains("E_X = NOWHERE | 1,"), "{}", translation.source);
}

#[test]
fn test_duplicate_enum_member_keeps_first_owner() {
    let translation = translate("enum A { SHARED = 1 }; enum B { SHARED = 2, OTHER = SHARED };");
    let duplicates = translation.diagnostics.with_code("S0001");
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].message.contains("SHARED"));
    assert!(translation.source.contains("OTHER = ((int)(A.SHARED)),"), "{}", translation.source);
}

#[test]
fn test_large_hex_values_use_unchecked_cast() {
    let source = render("enum Flags { F_HIGH = 0x80000000, F_LOW = 0x1 };");
    assert!(source.contains("F_HIGH = unchecked((int)0x80000000),"), "{}", source);
    assert!(source.contains("F_LOW = 1,"));
}

#[test]
fn test_constants_go_to_holder_class() {
    let source = render(
        "const long MAX_ITEMS = 16;
         const LPWSTR GREETING = L\"hello\";
         enum Limits { L_MAX = MAX_ITEMS };",
    );
    let holder = block(&source, "public static class Constants").join("\n");
    assert!(holder.contains("public const int MAX_ITEMS = 16;"));
    assert!(holder.contains("public const string GREETING = \"hello\";"));
    assert!(source.contains("L_MAX = Constants.MAX_ITEMS,"), "{}", source);
}
