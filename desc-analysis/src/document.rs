//! Line-indexed, read-only access to document text.

use serde::Serialize;

/// Minimal view over a document the engine needs: a line count and the text of
/// each line without its terminator.
pub trait DocumentView {
    fn line_count(&self) -> usize;
    fn line_text(&self, line: usize) -> Option<&str>;
}

impl<S: AsRef<str>> DocumentView for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.get(line).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> DocumentView for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.get(line).map(AsRef::as_ref)
    }
}

/// Zero-based location in a document. `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Owned document text with precomputed line boundaries.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    text: String,
    lines: Vec<std::ops::Range<usize>>,
}

impl LineIndex {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut lines = Vec::new();
        let mut start = 0;
        for (idx, ch) in text.char_indices() {
            if ch == '\n' {
                lines.push(trim_carriage_return(&text, start..idx));
                start = idx + ch.len_utf8();
            }
        }
        lines.push(trim_carriage_return(&text, start..text.len()));
        Self { text, lines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn trim_carriage_return(text: &str, span: std::ops::Range<usize>) -> std::ops::Range<usize> {
    if text[span.clone()].ends_with('\r') {
        span.start..span.end - 1
    } else {
        span
    }
}

impl DocumentView for LineIndex {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|span| &self.text[span.clone()])
    }
}

/// Text of the cursor line up to (not including) the cursor column.
///
/// Columns past the end of the line clamp to the full line; a line outside the
/// document yields an empty prefix.
pub fn line_prefix<D>(document: &D, position: Position) -> &str
where
    D: DocumentView + ?Sized,
{
    let Some(line) = document.line_text(position.line) else {
        return "";
    };
    match line.char_indices().nth(position.column) {
        Some((byte, _)) => &line[..byte],
        None => line,
    }
}
