//! Identifier escaping

/// C# reserved words; these need the `@` verbatim prefix
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Undocumented double-underscore keywords; `@` does not escape these
const RESERVED_UNDERSCORE: &[&str] = &["__arglist", "__makeref", "__reftype", "__refvalue"];

/// Built-in type keywords, valid as type names without escaping
const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "char", "decimal", "double", "float", "int", "long", "object", "sbyte",
    "short", "string", "uint", "ulong", "ushort", "void",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Escape a single identifier for use as a declaration or reference name.
///
/// Characters that cannot appear in an identifier become `_`, a leading
/// digit gets a `_` prefix, keywords get `@`, and the reserved
/// double-underscore set is prefixed with `_` until it no longer collides.
pub fn escape_identifier(name: &str) -> String {
    let mut out = sanitize(name);
    if is_keyword(&out) {
        return format!("@{}", out);
    }
    while RESERVED_UNDERSCORE.contains(&out.as_str()) {
        out.insert(0, '_');
    }
    out
}

/// Escape a type name; dotted names are escaped per segment and built-in
/// type keywords are left alone.
pub fn escape_type_name(name: &str) -> String {
    if PREDEFINED_TYPES.contains(&name) {
        return name.to_string();
    }
    name.split('.')
        .map(escape_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        let valid = if i == 0 {
            c == '_' || unicode_ident::is_xid_start(c)
        } else {
            unicode_ident::is_xid_continue(c)
        };
        if valid {
            out.push(c);
        } else if i == 0 && unicode_ident::is_xid_continue(c) {
            out.push('_');
            out.push(c);
        } else {
            out.push('_');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Count", "Count")]
    #[case("event", "@event")]
    #[case("params", "@params")]
    #[case("__arglist", "___arglist")]
    #[case("__refvalue", "___refvalue")]
    #[case("2D", "_2D")]
    #[case("a-b", "a_b")]
    #[case("größe", "größe")]
    fn test_escape_identifier(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_identifier(input), expected);
    }

    #[test]
    fn test_escape_type_name() {
        assert_eq!(escape_type_name("int"), "int");
        assert_eq!(escape_type_name("System.IntPtr"), "System.IntPtr");
        assert_eq!(escape_type_name("Outer.class"), "Outer.@class");
        assert_eq!(escape_type_name("lock"), "@lock");
    }
}
