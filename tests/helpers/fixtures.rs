//! IDL sources shared between tests.

pub const IFOO_BAR: &str = r#"
[object, uuid(6b29fc40-ca47-1067-b31d-00dd010662da)]
interface IFoo : IUnknown {
    [propget] HRESULT Bar([out, retval] long* value);
};
"#;

pub const SHAPES_LIBRARY: &str = r#"
import "oaidl.idl";

[uuid(0A0B0C0D-0000-0000-0000-000000000001), version(1.0)]
library ShapesLib {
    importlib("stdole2.tlb");

    typedef enum tagShapeKind { SK_CIRCLE = 1, SK_SQUARE, SK_ALL = SK_CIRCLE | SK_SQUARE } ShapeKind;

    [object, uuid(0A0B0C0D-0000-0000-0000-000000000010), helpstring("A drawable shape")]
    interface IShape : IUnknown {
        [propget] HRESULT Kind([out, retval] ShapeKind* kind);
        [propget] HRESULT Name([out, retval] BSTR* name);
        [propput] HRESULT Name([in] BSTR name);
        HRESULT Draw([in] long x, [in] long y);
    };

    [object, uuid(0A0B0C0D-0000-0000-0000-000000000011), dual]
    interface ICircle : IShape {
        [propget, id(5)] HRESULT Radius([out, retval] double* radius);
    };

    [uuid(0A0B0C0D-0000-0000-0000-000000000012)]
    dispinterface DShapeEvents {
        properties:
        methods:
            [id(1)] void Moved([in] long x, [in] long y);
    };

    [uuid(0A0B0C0D-0000-0000-0000-000000000020)]
    coclass Circle {
        [default] interface ICircle;
        [source] dispinterface DShapeEvents;
    };
};
"#;
