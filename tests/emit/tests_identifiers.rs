use crate::helpers::{block, translate};

#[test]
fn test_keyword_parameters_are_escaped() {
    let source = translate("interface IMove { HRESULT Move([in] long base, [in] long params, [in] long checked); };").source;
    assert!(source.contains("void Move(int @base, int @params, int @checked);"), "{}", source);
}

#[test]
fn test_keyword_enum_members_are_escaped() {
    let source = translate("enum Kinds { event = 1, class, lock };").source;
    let lines: Vec<String> = block(&source, "public enum Kinds")
        .iter()
        .map(|l| l.trim().to_string())
        .collect();
    assert_eq!(lines[2..5], ["@event = 1,", "@class,", "@lock,"]);
}

#[test]
fn test_non_keywords_are_left_alone() {
    let source = translate("interface IPlain { HRESULT Run([in] long value, [in] long Object); };").source;
    assert!(source.contains("void Run(int value, int Object);"));
}
