//! The per-invocation input consumed by the synchronizer and the heading
//! synthesizer.

use crate::edit::Position;
use crate::references::{LinkDefinition, ResolvedReference};

/// A markdown document together with everything the core needs to know
/// about it.
///
/// Built fresh for every run; the core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Full text of the document.
    pub text: String,
    /// End-of-line token used by the document, echoed into generated text.
    pub eol: String,
    /// Where content begins: right after front matter, or `0:0`.
    pub content_start: Position,
    /// Position just past the last character.
    pub end: Position,
    /// Authored title (front matter `title` or first level-one heading).
    ///
    /// Never defaulted from the file name, so `Some` means the author
    /// already gave the document a title.
    pub title: Option<String>,
    /// Stable name of the document, usually its file stem.
    pub identifier: String,
    /// Existing reference definitions, in document order.
    pub definitions: Vec<LinkDefinition>,
    /// References the document's links currently resolve to, in order.
    pub references: Vec<ResolvedReference>,
}

impl Document {
    /// Creates a document with no definitions, references or title.
    ///
    /// Positions are derived from `text` using `eol`.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        eol: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let eol = eol.into();
        let end = crate::edit::LineIndex::new(&text, &eol).end();
        Self {
            text,
            eol,
            content_start: Position::new(0, 0),
            end,
            title: None,
            identifier: identifier.into(),
            definitions: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Text of line `line`, split on the document's `eol`.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        self.text.split(self.eol.as_str()).nth(line)
    }
}
