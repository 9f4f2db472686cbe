//! Lightweight markdown scanning.
//!
//! This is not a markdown parser. It recovers exactly what the janitor
//! needs from a note:
//!
//! - the end-of-line convention and the structural positions
//!   (`content_start`, `end`)
//! - an authored title from front matter or the first `# ` heading
//! - the reference definitions in the trailing definition region, with
//!   their line ranges
//! - wiki links outside fenced and inline code
//!
//! Only definitions at the bottom of the note are collected: the
//! synchronizer replaces the span from the first to the last definition, so
//! anything else inside that span would be lost.

pub mod front_matter;
pub mod patterns;
pub mod wikilink;

pub use wikilink::WikiLink;

use crate::document::Document;
use crate::edit::{LineIndex, Position, Range};
use crate::references::{LinkDefinition, ResolvedReference};
use patterns::{DEFINITION_RE, FENCE_RE, H1_RE};

/// Everything recovered from one note's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// End-of-line token.
    pub eol: String,
    /// Start of content after front matter.
    pub content_start: Position,
    /// Position just past the last character.
    pub end: Position,
    /// Authored title, if any.
    pub title: Option<String>,
    /// Definitions in the trailing definition region, in order.
    pub definitions: Vec<LinkDefinition>,
    /// Wiki links in document order.
    pub links: Vec<WikiLink>,
}

impl Scan {
    /// Assembles the core input from this scan.
    #[must_use]
    pub fn into_document(
        self,
        text: impl Into<String>,
        identifier: impl Into<String>,
        references: Vec<ResolvedReference>,
    ) -> Document {
        Document {
            text: text.into(),
            eol: self.eol,
            content_start: self.content_start,
            end: self.end,
            title: self.title,
            identifier: identifier.into(),
            definitions: self.definitions,
            references,
        }
    }
}

/// Detects the end-of-line token of `text`: CRLF if it occurs, else LF.
#[must_use]
pub fn detect_eol(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Scans `text`.
#[must_use]
pub fn scan(text: &str) -> Scan {
    let eol = detect_eol(text);
    let lines: Vec<&str> = text.split(eol).collect();
    let end = LineIndex::new(text, eol).end();

    let front_matter = front_matter::detect(&lines);
    let (content_line, content_start) = match &front_matter {
        Some(fm) if fm.closing_line + 1 < lines.len() => {
            (fm.closing_line + 1, Position::new(fm.closing_line + 1, 0))
        }
        Some(fm) => {
            (lines.len(), Position::new(fm.closing_line, lines[fm.closing_line].len()))
        }
        None => (0, Position::new(0, 0)),
    };

    let in_code = code_lines(&lines);
    let definitions = trailing_definitions(&lines, &in_code, content_line);
    // Titles in the definition region never count as links.
    let links_end = definitions
        .first()
        .and_then(|def| def.range)
        .map_or(lines.len(), |range| range.start.line);

    let mut title = front_matter.and_then(|fm| fm.title);
    let mut links = Vec::new();
    for (idx, line) in lines.iter().enumerate().take(links_end).skip(content_line) {
        if in_code[idx] {
            continue;
        }
        if title.is_none() {
            title = H1_RE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|t| !t.is_empty());
        }
        wikilink::extract_from_line(line, idx, &mut links);
    }

    Scan { eol: eol.to_string(), content_start, end, title, definitions, links }
}

/// Parses one definition line.
#[must_use]
pub fn parse_definition(line: &str) -> Option<(String, String, Option<String>)> {
    let caps = DEFINITION_RE.captures(line)?;
    let label = caps.get(1)?.as_str();
    if label.starts_with('^') {
        return None;
    }
    let target = caps.get(2)?.as_str();
    let title = caps.get(3).or_else(|| caps.get(4)).or_else(|| caps.get(5));
    Some((label.to_string(), target.to_string(), title.map(|m| m.as_str().to_string())))
}

/// Collects definitions from the bottom of the note upward, stopping at the
/// first line that is neither blank nor a definition.
fn trailing_definitions(
    lines: &[&str],
    in_code: &[bool],
    content_line: usize,
) -> Vec<LinkDefinition> {
    let mut definitions = Vec::new();
    for idx in (content_line..lines.len()).rev() {
        let line = lines[idx];
        if in_code[idx] {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let Some((label, target, title)) = parse_definition(line) else {
            break;
        };
        definitions.push(LinkDefinition {
            label,
            target,
            title,
            range: Some(Range::new(Position::new(idx, 0), Position::new(idx, line.len()))),
        });
    }
    definitions.reverse();
    definitions
}

/// Marks lines inside fenced code blocks, fences included.
fn code_lines(lines: &[&str]) -> Vec<bool> {
    let mut marks = Vec::with_capacity(lines.len());
    let mut open: Option<&str> = None;
    for line in lines {
        let fence = FENCE_RE.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str());
        match (open, fence) {
            (None, Some(run)) => {
                open = Some(run);
                marks.push(true);
            }
            (Some(current), Some(run))
                if run.starts_with(&current[..1]) && run.len() >= current.len() =>
            {
                open = None;
                marks.push(true);
            }
            (Some(_), _) => marks.push(true),
            (None, None) => marks.push(false),
        }
    }
    marks
}
