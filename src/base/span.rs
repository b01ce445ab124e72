//! Byte offsets and line lookup.

pub use text_size::{TextRange, TextSize};

use super::Position;

/// Maps byte offsets in a source text to line/column positions.
///
/// Built once per compilation unit; lookups are a binary search over the
/// line start table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Line/column for an offset. Offsets past the end clamp to the last position.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = offset - self.line_starts[line];
        Position::new(line as u32 + 1, u32::from(column))
    }

    /// 1-based line number for an offset.
    pub fn line(&self, offset: TextSize) -> u32 {
        self.position(offset).line
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
