//! Documentation lookup
//!
//! Doc text is supplied from outside the IDL (generated help files, a
//! documentation database) and spliced verbatim above the matching emitted
//! declaration.

use rustc_hash::FxHashMap;

/// Source of documentation text, keyed by symbol name and declaration line.
pub trait DocLookup: Send + Sync {
    fn lookup(&self, name: &str, line: u32) -> Option<String>;
}

/// No external documentation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocs;

impl DocLookup for NoDocs {
    fn lookup(&self, _name: &str, _line: u32) -> Option<String> {
        None
    }
}

/// In-memory documentation table.
///
/// An entry registered with a line only matches a declaration on that
/// line; an entry without one matches the name anywhere.
#[derive(Debug, Clone, Default)]
pub struct DocTable {
    by_line: FxHashMap<(String, u32), String>,
    by_name: FxHashMap<String, String>,
}

impl DocTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.by_name.insert(name.into(), text.into());
    }

    pub fn insert_at(&mut self, name: impl Into<String>, line: u32, text: impl Into<String>) {
        self.by_line.insert((name.into(), line), text.into());
    }

    pub fn len(&self) -> usize {
        self.by_line.len() + self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocLookup for DocTable {
    fn lookup(&self, name: &str, line: u32) -> Option<String> {
        self.by_line
            .get(&(name.to_string(), line))
            .or_else(|| self.by_name.get(name))
            .cloned()
    }
}
