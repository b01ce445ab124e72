//! String, character and numeric literals

use crate::codemodel::Primitive;

/// Strings of this many characters or more use verbatim quoting
const VERBATIM_MIN: usize = 256;
/// Strings longer than this go back to escaped quoting
const VERBATIM_MAX: usize = 1500;
/// Characters per line of an escaped string before it is continued
const MAX_LINE_LENGTH: usize = 80;

/// Quote a string literal.
///
/// Returns the literal as one or more quoted pieces. More than one piece
/// means the literal is continued with `+` across lines; the caller decides
/// the continuation indentation.
pub fn quote_string(value: &str) -> Vec<String> {
    let length = value.chars().count();
    if (VERBATIM_MIN..=VERBATIM_MAX).contains(&length) && !value.contains('\0') {
        return vec![quote_verbatim(value)];
    }
    quote_escaped(value)
}

fn quote_verbatim(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 3);
    out.push_str("@\"");
    for c in value.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn quote_escaped(value: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::from("\"");
    for (i, c) in value.chars().enumerate() {
        if i > 0 && i % MAX_LINE_LENGTH == 0 {
            current.push('"');
            pieces.push(std::mem::replace(&mut current, String::from("\"")));
        }
        push_escaped(&mut current, c);
    }
    current.push('"');
    pieces.push(current);
    pieces
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\0' => out.push_str("\\0"),
        '\u{2028}' => out.push_str("\\u2028"),
        '\u{2029}' => out.push_str("\\u2029"),
        '"' => out.push_str("\\\""),
        '\'' => out.push_str("\\'"),
        _ => out.push(c),
    }
}

/// `'c'` with the same escapes as strings
pub fn quote_char(value: char) -> String {
    let mut out = String::from("'");
    push_escaped(&mut out, value);
    out.push('\'');
    out
}

/// Render a non-string primitive; strings go through [`quote_string`].
pub fn render_primitive(value: &Primitive) -> String {
    match value {
        Primitive::Null => "null".to_string(),
        Primitive::Bool(b) => b.to_string(),
        Primitive::Char(c) => quote_char(*c),
        Primitive::Str(s) => quote_string(s).join(" + "),
        Primitive::Int(n) => n.to_string(),
        Primitive::Long(n) => format!("{}L", n),
        Primitive::UInt(n) => format!("{}u", n),
        Primitive::ULong(n) => format!("{}ul", n),
        Primitive::Float(f) => render_float(*f),
        Primitive::Double(d) => render_double(*d),
        Primitive::Decimal(digits) => format!("{}m", digits),
    }
}

fn render_float(value: f32) -> String {
    if value.is_nan() {
        "float.NaN".to_string()
    } else if value == f32::INFINITY {
        "float.PositiveInfinity".to_string()
    } else if value == f32::NEG_INFINITY {
        "float.NegativeInfinity".to_string()
    } else {
        format!("{}F", value)
    }
}

fn render_double(value: f64) -> String {
    if value.is_nan() {
        "double.NaN".to_string()
    } else if value == f64::INFINITY {
        "double.PositiveInfinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "double.NegativeInfinity".to_string()
    } else {
        // Debug formatting round-trips and always marks the value as real
        format!("{:?}", value)
    }
}
