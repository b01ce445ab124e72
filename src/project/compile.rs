//! Compiling files and directories
//!
//! Units are independent, so several files are compiled in parallel with
//! rayon. Each file is read whole and written whole.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::file_loader;
use crate::error::CompileError;
use crate::translator::{Translation, Translator};

/// Extension of generated files
pub const OUTPUT_EXTENSION: &str = "cs";

/// Outcome of compiling one input file
#[derive(Debug)]
pub struct CompiledFile {
    pub input: PathBuf,
    pub result: Result<Translation, CompileError>,
}

/// Read and translate a single file.
pub fn compile_file(path: &Path, translator: &Translator) -> Result<Translation, CompileError> {
    let text = file_loader::load_file(path)?;
    let translation = translator.translate(&text)?;
    tracing::debug!(
        file = %path.display(),
        syntax_errors = translation.syntax_errors.len(),
        diagnostics = translation.diagnostics.errors().len(),
        "compiled file"
    );
    Ok(translation)
}

/// Translate several files in parallel; results keep the input order.
pub fn compile_files(paths: &[PathBuf], translator: &Translator) -> Vec<CompiledFile> {
    paths
        .par_iter()
        .map(|path| CompiledFile {
            input: path.clone(),
            result: compile_file(path, translator),
        })
        .collect()
}

/// `<out_dir>/<stem>.cs` for an input file
pub fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    out_dir.join(name)
}

/// Write generated source, creating the parent directory when needed.
pub fn write_output(path: &Path, source: &str) -> Result<(), CompileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CompileError::io(parent, e))?;
    }
    std::fs::write(path, source).map_err(|e| CompileError::io(path, e))
}

/// Compile every IDL file under `dir` into `out_dir`.
///
/// Files that fail are reported in the returned list and produce no output;
/// the others are still written.
pub fn compile_directory(
    dir: &Path,
    out_dir: &Path,
    translator: &Translator,
) -> Result<Vec<CompiledFile>, CompileError> {
    let paths = file_loader::collect_file_paths(dir)?;
    let mut compiled = compile_files(&paths, translator);
    for file in &mut compiled {
        let Ok(translation) = &file.result else {
            continue;
        };
        let target = output_path(&file.input, out_dir);
        if let Err(e) = write_output(&target, &translation.source) {
            tracing::warn!(file = %target.display(), "failed to write output");
            file.result = Err(e);
        }
    }
    let failed = compiled.iter().filter(|f| f.result.is_err()).count();
    if failed > 0 {
        tracing::warn!(failed, total = compiled.len(), "some files failed to compile");
    }
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("idl/acme.idl"), Path::new("out")),
            PathBuf::from("out/acme.cs")
        );
        assert_eq!(
            output_path(Path::new("shapes.v2.idl"), Path::new("gen")),
            PathBuf::from("gen/shapes.v2.cs")
        );
    }
}
