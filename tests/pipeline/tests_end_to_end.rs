#![allow(clippy::unwrap_used)]

use crate::helpers::fixtures::{IFOO_BAR, SHAPES_LIBRARY};
use crate::helpers::{assert_in_order, block, render, translate};

#[test]
fn test_ifoo_bar_renders_getter_only_property() {
    let expected = "\
using System;
using System.Runtime.InteropServices;
using System.Runtime.CompilerServices;

namespace Interop
{
    [ComImport]
    [Guid(\"6B29FC40-CA47-1067-B31D-00DD010662DA\")]
    [InterfaceType(ComInterfaceType.InterfaceIsIUnknown)]
    public interface IFoo
    {
        int Bar
        {
            get;
        }
    }
}
";
    let translation = translate(IFOO_BAR);
    assert!(translation.diagnostics.is_empty());
    assert!(translation.syntax_errors.is_empty());
    assert_eq!(translation.source, expected);
}

#[test]
fn test_library_sets_namespace_and_keeps_declaration_order() {
    let translation = translate(SHAPES_LIBRARY);
    assert_eq!(translation.namespace, "ShapesLib");
    assert!(!translation.has_errors(), "{:?}", translation.diagnostics);
    assert_in_order(
        &translation.source,
        &[
            "namespace ShapesLib",
            "public enum ShapeKind",
            "public interface IShape",
            "public interface ICircle : IShape",
            "public interface DShapeEvents",
            "public interface Circle : ICircle",
            "public class _CircleClass : ICircle, Circle",
            "public static class CoCircle",
        ],
    );
}

#[test]
fn test_property_synthesis_merges_get_and_put() {
    let source = render(SHAPES_LIBRARY);
    let name = block(&source, "string Name");
    assert_eq!(
        name.iter().map(|l| l.trim()).collect::<Vec<_>>(),
        vec![
            "string Name",
            "{",
            "[return: MarshalAs(UnmanagedType.BStr)]",
            "get;",
            "[param: MarshalAs(UnmanagedType.BStr)]",
            "set;",
            "}",
        ]
    );
    assert!(source.contains("void Draw(int x, int y);"));
    assert!(source.contains("/// A drawable shape"));
}

#[test]
fn test_unpaired_accessors_become_methods() {
    let source = render(
        "interface IA {
             [propget] HRESULT Item([in] long index, [out, retval] BSTR* value);
             [propput] HRESULT Item([in] long index, [in] BSTR value);
         };",
    );
    assert!(source.contains("string get_Item(int index);"));
    assert!(source.contains("void set_Item(int index, [MarshalAs(UnmanagedType.BStr)] string value);"));
}

#[test]
fn test_derived_interface_shadows_ancestor_members() {
    let source = render(SHAPES_LIBRARY);
    let circle = block(&source, "public interface ICircle : IShape");
    let text = circle.join("\n");
    assert_in_order(
        &text,
        &[
            "new ShapeKind Kind",
            "new string Name",
            "new void Draw(int x, int y);",
            "[DispId(5)]",
            "double Radius",
        ],
    );
    assert!(!text.contains("new double Radius"));
    assert!(source.contains(
        "[InterfaceType(ComInterfaceType.InterfaceIsDual)]\n    public interface ICircle : IShape"
    ));
}

#[test]
fn test_dispinterface_methods_are_not_preserve_sig() {
    let source = render(SHAPES_LIBRARY);
    let events = block(&source, "public interface DShapeEvents").join("\n");
    assert!(events.contains("[DispId(1)]"));
    assert!(events.contains("void Moved(int x, int y);"));
    assert!(!events.contains("PreserveSig"));
    assert!(source.contains(
        "[InterfaceType(ComInterfaceType.InterfaceIsIDispatch)]\n    public interface DShapeEvents"
    ));
}
