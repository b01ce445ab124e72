//! Contextual word tables for the IDL grammar.

/// Words that combine into multi-word integer type names (`unsigned long int`).
pub const INTEGER_TYPE_WORDS: &[&str] = &[
    "long", "short", "int", "char", "hyper", "small", "double", "__int8", "__int16", "__int32",
    "__int64", "__int3264", "wchar_t",
];

/// Calling-convention and pointer decorations that carry no meaning for the
/// generated code and are skipped wherever a type or declarator is parsed.
pub const IGNORED_DECORATIONS: &[&str] = &[
    "__stdcall",
    "__cdecl",
    "__fastcall",
    "_stdcall",
    "_cdecl",
    "__RPC_FAR",
    "__RPC_API",
    "__RPC_USER",
    "__RPC_STUB",
    "STDMETHODCALLTYPE",
    "STDAPICALLTYPE",
    "WINAPI",
    "CALLBACK",
    "__far",
    "__near",
    "far",
    "near",
    "__ptr32",
    "__ptr64",
    "volatile",
];

/// Words that may follow `unsigned`/`signed` or start a primitive type.
pub fn is_integer_word(text: &str) -> bool {
    INTEGER_TYPE_WORDS.contains(&text)
}

pub fn is_ignored_decoration(text: &str) -> bool {
    IGNORED_DECORATIONS.contains(&text)
}

/// Normalize the words of a multi-word primitive into a single spelling.
///
/// `long int` -> `long`, `long long` -> `hyper`, `signed short` -> `short`,
/// `unsigned` -> `unsigned int`, `unsigned long int` -> `unsigned long`.
pub fn normalize_primitive(words: &[&str]) -> String {
    let mut unsigned = false;
    let mut signed = false;
    let mut rest: Vec<&str> = Vec::new();
    for &word in words {
        match word {
            "unsigned" => unsigned = true,
            "signed" => signed = true,
            other => rest.push(other),
        }
    }
    if rest.len() > 1 && rest.last() == Some(&"int") {
        rest.pop();
    }
    let base = match rest.as_slice() {
        [] => "int".to_string(),
        ["long", "long"] => "hyper".to_string(),
        ["long", "double"] => "double".to_string(),
        words => words.join(" "),
    };
    if unsigned {
        format!("unsigned {}", base)
    } else if signed && base == "char" {
        "signed char".to_string()
    } else {
        base
    }
}
