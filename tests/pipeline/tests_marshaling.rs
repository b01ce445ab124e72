use comidl::semantic::codes;

use crate::helpers::{assert_in_order, block, translate};

const STREAM: &str = r#"
[object, uuid(0A0B0C0D-0000-0000-0000-000000000030)]
interface IBlob : IUnknown {
    HRESULT Read([out, size_is(cb)] byte* buffer, [in] ULONG cb, [out] ULONG* read);
    HRESULT SetKey([in, size_is(16)] byte* key);
    HRESULT Lost([in, size_is(missing)] long* values);
    HRESULT Query([in] REFIID riid, [out, iid_is(riid)] void** ppv);
    HRESULT SetName([in] BSTR name, [in] long count);
    ULONG Count();
};
"#;

fn trimmed(lines: Vec<&str>) -> Vec<String> {
    lines.iter().map(|l| l.trim().to_string()).collect()
}

#[test]
fn test_size_is_names_a_parameter_index() {
    let source = translate(STREAM).source;
    assert!(
        source.contains(
            "void Read([Out, MarshalAs(UnmanagedType.LPArray, SizeParamIndex = 1)] byte[] buffer, uint cb, out uint read);"
        ),
        "{}",
        source
    );
}

#[test]
fn test_constant_size_is_uses_size_const() {
    let source = translate(STREAM).source;
    assert!(source.contains("void SetKey([MarshalAs(UnmanagedType.LPArray, SizeConst = 16)] byte[] key);"));
}

#[test]
fn test_unresolved_size_is_is_noted_and_reported() {
    let translation = translate(STREAM);
    assert_in_order(
        &translation.source,
        &[
            "// NOTE: size_is(missing) on parameter 'values' could not be resolved",
            "void Lost([MarshalAs(UnmanagedType.LPArray)] int[] values);",
        ],
    );
    let reported = translation.diagnostics.with_code(codes::UNRESOLVED_SIZE_IS);
    assert_eq!(reported.len(), 1);
    assert!(reported[0].message.contains("missing"));
}

#[test]
fn test_iid_is_marshals_as_interface() {
    let source = translate(STREAM).source;
    assert!(source.contains(
        "[MarshalAs(UnmanagedType.Interface, IidParameterIndex = 0)] out object ppv);"
    ));
}

#[test]
fn test_strings_and_preserve_sig() {
    let source = translate(STREAM).source;
    assert!(source.contains("void SetName([MarshalAs(UnmanagedType.BStr)] string name, int count);"));
    assert!(source.contains("[PreserveSig]\n        uint Count();"), "{}", source);
    // HRESULT methods without a retval are not PreserveSig
    let body = block(&source, "public interface IBlob").join("\n");
    assert_eq!(body.matches("[PreserveSig]").count(), 1);
}

#[test]
fn test_struct_layout_and_fixed_arrays() {
    let source = translate(
        "typedef struct tagINFO { WCHAR name[32]; long values[4]; long* next; BSTR label; } INFO;",
    )
    .source;
    assert_eq!(
        trimmed(block(&source, "public struct INFO")),
        vec![
            "public struct INFO",
            "{",
            "[MarshalAs(UnmanagedType.ByValTStr, SizeConst = 32)]",
            "public string name;",
            "",
            "[MarshalAs(UnmanagedType.ByValArray, SizeConst = 4)]",
            "public int[] values;",
            "",
            "public IntPtr next;",
            "",
            "[MarshalAs(UnmanagedType.BStr)]",
            "public string label;",
            "}",
        ]
    );
    assert!(source.contains("[StructLayout(LayoutKind.Sequential, Pack = 4)]\n    public struct INFO"));
}

#[test]
fn test_module_functions_become_dll_imports() {
    let source = translate(
        r#"[dllname("acme.dll")] module AcmeApi {
            [entry("AcmeInit")] long Init([in] long flags);
            const long ACME_VERSION = 2;
        };"#,
    )
    .source;
    let holder = block(&source, "public static class AcmeApi").join("\n");
    assert_in_order(
        &holder,
        &[
            "public const int ACME_VERSION = 2;",
            "[DllImport(\"acme.dll\", EntryPoint = \"AcmeInit\")]",
            "public static extern int Init(int flags);",
        ],
    );
    assert!(!holder.contains("PreserveSig"));
}
