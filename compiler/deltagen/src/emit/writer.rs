//! Line-oriented source writer.
//!
//! Emitters write whole lines; the writer owns indentation so nested blocks
//! can be produced without threading a depth through every helper.

const INDENT: &str = "    ";

/// String-based writer for generated source.
#[derive(Default)]
pub struct CodeWriter {
    buffer: String,
    depth: usize,
}

impl CodeWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            depth: 0,
        }
    }

    /// Write one line at the current depth. An empty line gets no indent.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(INDENT);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Write a line that opens a block, then indent.
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent, then write the line that closes a block.
    pub fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Dedent, write a line that closes one block and opens the next, indent.
    pub fn reopen(&mut self, text: &str) {
        self.close(text);
        self.depth += 1;
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write an empty line, unless the previous line is already empty.
    pub fn blank(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with("\n\n") {
            self.buffer.push('\n');
        }
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// The finished text: no trailing blank lines, one trailing newline.
    pub fn finish(mut self) -> String {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }
}
