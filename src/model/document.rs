//! Document model - the text buffer, revision counter, and nesting depths

use ropey::Rope;
use std::path::PathBuf;

/// Per-line nesting depth, maintained by explicit indent/outdent commands.
///
/// Depth is never parsed from the text itself; it only changes when the
/// host issues `IndentLines`/`OutdentLines`. The map is sized lazily, so
/// lines created after the last depth command start at depth 0.
#[derive(Debug, Clone, Default)]
pub struct DepthMap {
    depths: Vec<usize>,
}

impl DepthMap {
    /// Depth for a line (0 if the line was never indented)
    pub fn depth(&self, line: usize) -> usize {
        self.depths.get(line).copied().unwrap_or(0)
    }

    /// Increase depth by one for every line in `lines`
    pub fn indent(&mut self, lines: impl IntoIterator<Item = usize>) {
        for line in lines {
            self.ensure_len(line + 1);
            self.depths[line] += 1;
        }
    }

    /// Decrease depth by one for every line in `lines`, flooring at 0
    pub fn outdent(&mut self, lines: impl IntoIterator<Item = usize>) {
        for line in lines {
            if let Some(d) = self.depths.get_mut(line) {
                *d = d.saturating_sub(1);
            }
        }
    }

    fn ensure_len(&mut self, len: usize) {
        if self.depths.len() < len {
            self.depths.resize(len, 0);
        }
    }
}

/// Document state - the text buffer and alignment-relevant metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for host-provided buffers)
    pub file_path: Option<PathBuf>,
    /// Revision counter, incremented on each content edit.
    /// Used for staleness checking of debounced alignment passes.
    pub revision: u64,
    /// External per-line nesting depth (fibonacci-indent policy input)
    pub depths: DepthMap,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            revision: 0,
            depths: DepthMap::default(),
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        Ok(Self {
            buffer: Rope::from(content),
            file_path: Some(path),
            revision: 0,
            depths: DepthMap::default(),
        })
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Get the length of a line in chars (excluding the newline)
    pub fn line_length(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return 0;
        }
        let line = self.buffer.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Get a line's text as a String (excluding the newline)
    pub fn line_text(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.buffer.len_lines() {
            return None;
        }
        let line = self.buffer.line(line_idx);
        Some(line.chars().take(self.line_length(line_idx)).collect())
    }

    /// Count of leading space characters on a line
    ///
    /// Only `' '` counts as leading whitespace; tabs are content as far as
    /// alignment is concerned (the policies emit spaces only).
    pub fn leading_width(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return 0;
        }
        self.buffer
            .line(line_idx)
            .chars()
            .take_while(|c| *c == ' ')
            .count()
    }

    /// Line length minus leading whitespace width
    pub fn content_length(&self, line_idx: usize) -> usize {
        self.line_length(line_idx) - self.leading_width(line_idx)
    }

    /// The longest content length over all lines
    ///
    /// Zero-content lines participate, so an empty document reports 0.
    pub fn max_content_length(&self) -> usize {
        (0..self.line_count())
            .map(|i| self.content_length(i))
            .max()
            .unwrap_or(0)
    }

    /// The longest total line length over all lines
    pub fn max_line_length(&self) -> usize {
        (0..self.line_count())
            .map(|i| self.line_length(i))
            .max()
            .unwrap_or(0)
    }

    /// Char offset of the start of a line.
    /// Uses ropey's O(log n) line_to_char method.
    pub fn line_start_offset(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        self.buffer.line_to_char(line_idx)
    }

    /// Insert text at a char offset and bump the revision
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        self.buffer.insert(char_idx, text);
        self.bump_revision();
    }

    /// Remove a char range and bump the revision
    pub fn remove(&mut self, range: std::ops::Range<usize>) {
        self.buffer.remove(range);
        self.bump_revision();
    }

    /// Record a content edit
    pub fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
