//! Finding and reading IDL source files

use std::path::{Path, PathBuf};

use crate::error::CompileError;

/// Extensions treated as IDL source
pub const IDL_EXTENSIONS: &[&str] = &["idl", "odl"];

/// Lower-cased extension of a path
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn validate_extension(path: &Path) -> Result<(), CompileError> {
    match get_extension(path) {
        Some(ext) if IDL_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(CompileError::UnsupportedFile {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a whole IDL file.
pub fn load_file(path: &Path) -> Result<String, CompileError> {
    validate_extension(path)?;
    std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))
}

/// Every IDL file under `dir`, recursively, in sorted order.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    tracing::debug!(dir = %dir.display(), files = paths.len(), "collected IDL files");
    Ok(paths)
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), CompileError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CompileError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| CompileError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_recursive(&path, paths)?;
        } else if validate_extension(&path).is_ok() {
            paths.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_file_paths_recurses_and_filters() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.idl"), "interface IB { };").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("a.ODL"), "interface IA { };").unwrap();

        let paths = collect_file_paths(temp.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["b.idl", "a.ODL"]);
    }

    #[test]
    fn test_load_file_errors() {
        let temp = TempDir::new().unwrap();
        let text = temp.path().join("notes.txt");
        fs::write(&text, "x").unwrap();
        assert!(matches!(
            load_file(&text),
            Err(CompileError::UnsupportedFile { .. })
        ));
        assert!(matches!(
            load_file(&temp.path().join("missing.idl")),
            Err(CompileError::Io { .. })
        ));
    }
}
