use std::fs;
use std::path::PathBuf;

use comidl::CompileError;
use comidl::project::{compile_directory, compile_files, output_path, write_output};
use tempfile::TempDir;

use crate::helpers::fixtures::{IFOO_BAR, SHAPES_LIBRARY};
use crate::helpers::translator;

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_compile_files_keeps_input_order() {
    let temp = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..8)
        .map(|i| {
            write(
                &temp,
                &format!("unit{}.idl", i),
                &format!("interface IUnit{} {{ HRESULT Run(); }};", i),
            )
        })
        .collect();

    let compiled = compile_files(&paths, &translator());
    assert_eq!(compiled.len(), 8);
    for (i, file) in compiled.iter().enumerate() {
        assert_eq!(file.input, paths[i]);
        let translation = file.result.as_ref().unwrap();
        assert!(translation.source.contains(&format!("public interface IUnit{}", i)));
    }
}

#[test]
fn test_compiling_in_parallel_matches_single_file() {
    let temp = TempDir::new().unwrap();
    let shapes = write(&temp, "shapes.idl", SHAPES_LIBRARY);
    let foo = write(&temp, "foo.idl", IFOO_BAR);

    let translator = translator();
    let together = compile_files(&[shapes.clone(), foo.clone()], &translator);
    let alone = translator.translate(SHAPES_LIBRARY).unwrap();
    assert_eq!(together[0].result.as_ref().unwrap().source, alone.source);
    // each unit gets its own namespace and type table
    assert_eq!(together[1].result.as_ref().unwrap().namespace, "Interop");
    assert!(!together[1].result.as_ref().unwrap().source.contains("ShapeKind"));
}

#[test]
fn test_missing_file_is_reported_per_file() {
    let temp = TempDir::new().unwrap();
    let good = write(&temp, "good.idl", IFOO_BAR);
    let missing = temp.path().join("missing.idl");

    let compiled = compile_files(&[good, missing.clone()], &translator());
    assert!(compiled[0].result.is_ok());
    match &compiled[1].result {
        Err(CompileError::Io { path, .. }) => assert_eq!(path, &missing),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_compile_directory_writes_outputs() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(&source, "foo.idl", IFOO_BAR);
    write(&source, "nested/shapes.v2.idl", SHAPES_LIBRARY);
    write(&source, "README.txt", "not idl");

    let out_dir = out.path().join("generated");
    let compiled = compile_directory(source.path(), &out_dir, &translator()).unwrap();
    assert_eq!(compiled.len(), 2);
    assert!(compiled.iter().all(|f| f.result.is_ok()));

    let foo = fs::read_to_string(out_dir.join("foo.cs")).unwrap();
    assert!(foo.contains("public interface IFoo"));
    let shapes = fs::read_to_string(out_dir.join("shapes.v2.cs")).unwrap();
    assert!(shapes.contains("namespace ShapesLib"));
    assert!(!out_dir.join("README.cs").exists());
}

#[test]
fn test_compile_directory_on_missing_dir_fails() {
    let temp = TempDir::new().unwrap();
    let result = compile_directory(&temp.path().join("nope"), temp.path(), &translator());
    assert!(matches!(result, Err(CompileError::Io { .. })));
}

#[test]
fn test_write_output_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let target = output_path(&temp.path().join("in/acme.idl"), &temp.path().join("a/b"));
    write_output(&target, "// empty\n").unwrap();
    assert_eq!(fs::read_to_string(target).unwrap(), "// empty\n");
}
