//! Text positions, ranges and the edits produced by the janitor.
//!
//! Positions are zero-based. `character` is a byte offset within its line,
//! and lines are delimited by the document's own end-of-line token, so a
//! CRLF document is addressed exactly the way it is stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A location in a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based byte offset within the line.
    pub character: usize,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A half-open span `[start, end)` of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// First position covered by the range.
    pub start: Position,
    /// Position just past the range.
    pub end: Position,
}

impl Range {
    /// Creates a range between two positions.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty range anchored at `position`.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { start: position, end: position }
    }

    /// Returns `true` when the range covers no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A replacement of one range of text.
///
/// An empty range is a pure insertion; otherwise exactly the covered span is
/// replaced by `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edit {
    /// Span being replaced.
    pub range: Range,
    /// Text written in place of the span.
    pub new_text: String,
}

impl Edit {
    /// Creates an insertion at `position`.
    #[must_use]
    pub fn insert(position: Position, new_text: impl Into<String>) -> Self {
        Self { range: Range::at(position), new_text: new_text.into() }
    }

    /// Creates a replacement of `range`.
    #[must_use]
    pub fn replace(range: Range, new_text: impl Into<String>) -> Self {
        Self { range, new_text: new_text.into() }
    }

    /// Applies the edit to `text`, whose lines are separated by `eol`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfBounds`] when either end of the range
    /// does not exist in `text`, and [`Error::InvertedRange`] when the range
    /// starts after it ends.
    pub fn apply(&self, text: &str, eol: &str) -> Result<String> {
        let index = LineIndex::new(text, eol);
        let start = index.offset(self.range.start)?;
        let end = index.offset(self.range.end)?;
        if start > end {
            return Err(Error::InvertedRange);
        }

        let mut out = String::with_capacity(text.len() - (end - start) + self.new_text.len());
        out.push_str(&text[..start]);
        out.push_str(&self.new_text);
        out.push_str(&text[end..]);
        Ok(out)
    }
}

/// Maps line/character positions to byte offsets.
#[derive(Debug)]
pub struct LineIndex<'a> {
    text: &'a str,
    eol_len: usize,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Indexes the line starts of `text`. An empty `eol` falls back to `\n`.
    #[must_use]
    pub fn new(text: &'a str, eol: &str) -> Self {
        let eol = if eol.is_empty() { "\n" } else { eol };
        let mut starts = vec![0];
        starts.extend(text.match_indices(eol).map(|(i, _)| i + eol.len()));
        Self { text, eol_len: eol.len(), starts }
    }

    /// Number of lines, counting a trailing empty line after a final `eol`.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Position just past the last character of the text.
    #[must_use]
    pub fn end(&self) -> Position {
        let last = self.starts.len() - 1;
        Position::new(last, self.text.len() - self.starts[last])
    }

    /// Byte offset of `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfBounds`] when the line does not exist,
    /// the character lies past the end of the line, or the offset splits a
    /// UTF-8 sequence.
    pub fn offset(&self, position: Position) -> Result<usize> {
        let out_of_bounds =
            || Error::PositionOutOfBounds { line: position.line, character: position.character };

        let start = *self.starts.get(position.line).ok_or_else(out_of_bounds)?;
        let offset = start + position.character;
        if offset > self.line_end(position.line) || !self.text.is_char_boundary(offset) {
            return Err(out_of_bounds());
        }
        Ok(offset)
    }

    fn line_end(&self, line: usize) -> usize {
        match self.starts.get(line + 1) {
            Some(next) => next - self.eol_len,
            None => self.text.len(),
        }
    }
}
