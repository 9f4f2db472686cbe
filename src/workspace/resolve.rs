//! Wiki link resolution against the workspace.

use std::collections::HashSet;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::debug;

use super::{Note, Workspace, NOTE_EXTENSIONS};
use crate::markdown::WikiLink;
use crate::references::{is_definition_label, ResolvedReference};
use crate::slug::slugify;

/// Characters escaped in generated targets. `/` and `.` stay readable.
const TARGET_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Knobs for turning links into references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Keep the note extension on targets.
    pub include_extensions: bool,
}

/// Joins a `./` or `../` link onto the directory of `source`.
///
/// Both paths are root-relative. `..` never climbs above the root.
///
/// ```
/// use mdjanitor::workspace::resolve_relative;
///
/// assert_eq!(resolve_relative("notes/source.md", "../ideas"), "ideas");
/// assert_eq!(resolve_relative("source.md", "../../deep"), "deep");
/// ```
#[must_use]
pub fn resolve_relative(source: &str, target: &str) -> String {
    let dir = source.rfind('/').map_or("", |idx| &source[..idx]);
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();

    for part in target.split('/') {
        match part {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            _ => segments.push(part),
        }
    }
    segments.join("/")
}

/// Path of `to` as seen from the directory containing `from`.
///
/// Both paths are root-relative notes.
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from_dir: Vec<&str> = from.split('/').collect();
    let from_dir = &from_dir[..from_dir.len().saturating_sub(1)];
    let to_parts: Vec<&str> = to.split('/').collect();

    let common = from_dir.iter().zip(&to_parts).take_while(|(a, b)| a == b).count();
    let mut parts: Vec<&str> = vec![".."; from_dir.len() - common];
    parts.extend(&to_parts[common..]);
    parts.join("/")
}

/// Percent-encodes a target path for use in a reference definition.
///
/// ```
/// use mdjanitor::workspace::encode_target;
///
/// assert_eq!(encode_target("../My Notes/ünï"), "../My%20Notes/%C3%BCn%C3%AF");
/// ```
#[must_use]
pub fn encode_target(path: &str) -> String {
    utf8_percent_encode(path, TARGET_ENCODE_SET).to_string()
}

/// Drops a trailing note extension, if any.
#[must_use]
pub fn strip_note_extension(path: &str) -> &str {
    if let Some((stem, ext)) = path.rsplit_once('.') {
        let is_note_ext = NOTE_EXTENSIONS.iter().any(|n| ext.eq_ignore_ascii_case(n));
        if is_note_ext && !stem.is_empty() && !stem.ends_with('/') {
            return stem;
        }
    }
    path
}

impl Workspace {
    /// Finds the note a link target from `source` points at.
    ///
    /// `./` and `../` targets must match a path exactly after joining onto
    /// the source directory. Other targets match notes whose path ends with
    /// the target, case-insensitively and ignoring extensions; an exact
    /// root-relative match wins, then the shortest path.
    #[must_use]
    pub fn find(&self, source: &str, target: &str) -> Option<&Note> {
        let target = target.trim();
        let is_relative = target.starts_with("./") || target.starts_with("../");
        let wanted = if is_relative {
            resolve_relative(source, target)
        } else {
            target.trim_start_matches('/').to_string()
        };
        let wanted = strip_note_extension(&wanted).to_lowercase();
        let wanted: Vec<&str> = wanted.split('/').filter(|s| !s.is_empty()).collect();
        if wanted.is_empty() {
            return None;
        }

        self.notes
            .iter()
            .filter_map(|note| {
                let candidate = strip_note_extension(&note.path).to_lowercase();
                let parts: Vec<&str> = candidate.split('/').collect();
                let exact = parts == wanted;
                let matches = if is_relative { exact } else { parts.ends_with(&wanted) };
                matches.then_some((!exact, parts.len(), note))
            })
            .min_by(|a, b| (a.0, a.1, &a.2.path).cmp(&(b.0, b.1, &b.2.path)))
            .map(|(_, _, note)| note)
    }

    /// Turns the links of the note at `source` into references.
    ///
    /// Unresolved links are placeholders and yield nothing. Links whose raw
    /// text cannot label a definition line (footnote carets, brackets, the
    /// sentinel labels) are skipped too. When several links share a label
    /// only the first is kept.
    #[must_use]
    pub fn references(
        &self,
        source: &str,
        links: &[WikiLink],
        options: ResolveOptions,
    ) -> Vec<ResolvedReference> {
        let mut seen = HashSet::new();
        let mut references = Vec::new();

        for link in links {
            if seen.contains(link.raw.as_str()) {
                continue;
            }
            if !is_definition_label(&link.raw) {
                debug!(source, link = %link.raw, "skipping link that cannot label a definition");
                continue;
            }
            let Some(note) = self.find(source, &link.target) else {
                debug!(source, link = %link.raw, "skipping placeholder link");
                continue;
            };
            seen.insert(link.raw.as_str());

            let path = relative_path(source, &note.path);
            let path = if options.include_extensions {
                path.as_str()
            } else {
                strip_note_extension(&path)
            };
            let mut target = encode_target(path);
            if let Some(section) = &link.section {
                target.push('#');
                target.push_str(&slugify(section));
            }
            references.push(ResolvedReference::new(&link.raw, target, Some(note.title())));
        }
        references
    }
}
