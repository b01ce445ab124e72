use crate::helpers::translate;

fn string_constant(len: usize) -> String {
    let value = "a".repeat(len);
    translate(&format!("const LPWSTR TEXT = L\"{}\";", value)).source
}

#[test]
fn test_short_string_is_a_single_literal() {
    let source = translate("const LPWSTR GREETING = L\"tab\\there \\\"quoted\\\"\";").source;
    assert!(
        source.contains(r#"public const string GREETING = "tab\there \"quoted\"";"#),
        "{}",
        source
    );
}

#[test]
fn test_string_below_verbatim_threshold_is_split() {
    let source = string_constant(255);
    assert!(!source.contains("@\""));
    let continuations = source.lines().filter(|l| l.ends_with("\" +")).count();
    assert_eq!(continuations, 3);
    let pieces: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|l| l.trim_start_matches("public const string TEXT = ").starts_with("\"a"))
        .collect();
    assert_eq!(pieces.len(), 4);
    // continuation lines sit one level deeper than the field
    assert!(source.contains(&format!("\" +\n            \"{}", "a".repeat(80))));
}

#[test]
fn test_string_at_verbatim_threshold_is_verbatim() {
    let source = string_constant(256);
    assert!(source.contains(&format!("public const string TEXT = @\"{}\";", "a".repeat(256))));
}

#[test]
fn test_string_above_verbatim_limit_is_split_again() {
    let source = string_constant(1501);
    assert!(!source.contains("@\""));
    assert_eq!(source.lines().filter(|l| l.ends_with("\" +")).count(), 18);
}

#[test]
fn test_numeric_constants() {
    let source = translate(
        "const double RATIO = 0.5;
         const ULONG MASK = 0xFFFFFFFF;
         const long SMALL = -3;",
    )
    .source;
    assert!(source.contains("public const double RATIO = 0.5;"), "{}", source);
    assert!(source.contains("public const uint MASK = 4294967295u;"), "{}", source);
    assert!(source.contains("public const int SMALL = -3;"), "{}", source);
}
