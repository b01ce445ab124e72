//! Indented text output

/// Line-oriented writer that indents lazily.
///
/// Indentation is written with the first text of each line, so the level can
/// change between a line break and the text that follows it (continuation
/// lines rely on this).
#[derive(Debug)]
pub struct CodeWriter {
    output: String,
    indent: String,
    indent_level: usize,
    at_line_start: bool,
}

impl CodeWriter {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            indent: indent.into(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(&self.indent);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    /// Write `text` and end the line.
    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// An empty line; never carries indentation
    pub fn blank_line(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
        self.output.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn set_indent_level(&mut self, level: usize) {
        self.indent_level = level;
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_indentation() {
        let mut w = CodeWriter::new("  ");
        w.line("a {");
        w.indent();
        w.write("b");
        w.newline();
        w.indent();
        w.line("c");
        w.set_indent_level(0);
        w.blank_line();
        w.line("}");
        assert_eq!(w.finish(), "a {\n  b\n    c\n\n}\n");
    }
}
