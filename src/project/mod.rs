//! Project-level helpers: file discovery and parallel compilation of
//! several units.

mod compile;
pub mod file_loader;

pub use compile::{
    CompiledFile, OUTPUT_EXTENSION, compile_directory, compile_file, compile_files, output_path,
    write_output,
};
