#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use comidl::Translator;
use comidl::semantic::{BuildContext, BuildOptions, StaThreadGuard, TypeInfo};

use crate::helpers::fixtures::SHAPES_LIBRARY;
use crate::helpers::{assert_in_order, block, plain_options, render};

#[test]
fn test_coclass_expands_into_three_types() {
    let (model, _) = Translator::new().build(SHAPES_LIBRARY);
    let entries: Vec<_> = model
        .types()
        .filter_map(|t| match &t.info {
            TypeInfo::CoClassInterface { coclass }
            | TypeInfo::CoClassObject { coclass }
            | TypeInfo::Creator { coclass } => Some((t.decl.name.clone(), coclass.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        entries,
        vec![
            ("Circle".to_string(), "Circle".to_string()),
            ("_CircleClass".to_string(), "Circle".to_string()),
            ("CoCircle".to_string(), "Circle".to_string()),
        ]
    );
}

#[test]
fn test_coclass_interface_takes_default_interface_guid() {
    let source = render(SHAPES_LIBRARY);
    assert_in_order(
        &source,
        &[
            "[ComImport]",
            "[Guid(\"0A0B0C0D-0000-0000-0000-000000000011\")]",
            "[CoClass(typeof(_CircleClass))]",
            "public interface Circle : ICircle",
        ],
    );
}

#[test]
fn test_object_class_has_extern_stubs_for_flattened_members() {
    let source = render(SHAPES_LIBRARY);
    assert!(source.contains(
        "[Guid(\"0A0B0C0D-0000-0000-0000-000000000020\")]\n    [ClassInterface(ClassInterfaceType.None)]\n    public class _CircleClass"
    ));
    let class = block(&source, "public class _CircleClass : ICircle, Circle").join("\n");
    assert_in_order(
        &class,
        &[
            "[MethodImpl(MethodImplOptions.InternalCall, MethodCodeType = MethodCodeType.Runtime)]",
            "public extern _CircleClass();",
            "public virtual extern ShapeKind Kind",
            "public virtual extern string Name",
            "public virtual extern void Draw(int x, int y);",
            "public virtual extern double Radius",
        ],
    );
    // source interfaces are not implemented by the wrapper
    assert!(!class.contains("Moved"));
    assert!(!class.contains("new "));
}

#[test]
fn test_creator_uses_factory_policy() {
    let source = render(SHAPES_LIBRARY);
    let creator = block(&source, "public static class CoCircle").join("\n");
    assert!(creator.contains("public static Circle Create()"));
    assert!(creator.contains("return new _CircleClass();"));

    let guarded = Translator::new()
        .with_context(BuildContext::default().with_factory(Arc::new(StaThreadGuard)))
        .with_render_options(plain_options())
        .translate(SHAPES_LIBRARY)
        .unwrap()
        .source;
    assert!(guarded.contains("using System.Threading;"));
    assert_in_order(
        &guarded,
        &[
            "public static Circle Create()",
            "if (Thread.CurrentThread.GetApartmentState() != ApartmentState.STA)",
            "throw new InvalidOperationException(\"Circle must be created on a single-threaded apartment thread\");",
            "return new _CircleClass();",
        ],
    );
}

#[test]
fn test_noncreatable_and_disabled_creators() {
    let source = render(
        "interface IA { HRESULT F(); };
         [noncreatable] coclass A { interface IA; };",
    );
    assert!(source.contains("public class _AClass : IA, A"));
    assert!(!source.contains("class CoA"));

    let translation = Translator::new()
        .with_options(BuildOptions {
            emit_creators: false,
            ..BuildOptions::default()
        })
        .translate("interface IB { }; coclass B { interface IB; };")
        .unwrap();
    assert!(!translation.source.contains("class CoB"));
}

#[test]
fn test_coclass_with_unknown_interface_is_reported() {
    let translation = crate::helpers::translate("coclass Lost { interface IMissing; };");
    assert_eq!(translation.diagnostics.with_code("S0004").len(), 1);
    assert!(translation.source.contains("public interface Lost : IMissing"));
}
