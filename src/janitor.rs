//! Per-note janitoring: heading synthesis followed by link reference
//! synchronization.

use serde::Serialize;

use crate::config::JanitorConfig;
use crate::edit::Edit;
use crate::error::Result;
use crate::heading;
use crate::references::{locate_block, synchronize, SentinelSpan};
use crate::workspace::{ResolveOptions, Workspace};

/// What a janitor pass is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JanitorOptions {
    /// How links become references.
    pub resolve: ResolveOptions,
    /// Whether to insert missing headings.
    pub headings: bool,
}

impl Default for JanitorOptions {
    fn default() -> Self {
        Self { resolve: ResolveOptions::default(), headings: true }
    }
}

impl From<&JanitorConfig> for JanitorOptions {
    fn from(config: &JanitorConfig) -> Self {
        Self {
            resolve: ResolveOptions { include_extensions: config.include_extensions },
            headings: config.headings,
        }
    }
}

/// The outcome of janitoring one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteChanges {
    /// Root-relative path of the note.
    pub path: String,
    /// Heading insertion against the original text.
    pub heading: Option<Edit>,
    /// Reference block edit against the heading-applied text.
    pub references: Option<Edit>,
    /// Text after both edits.
    #[serde(skip)]
    pub text: String,
    /// State of the previously generated block.
    #[serde(skip)]
    pub sentinel: SentinelSpan,
}

impl NoteChanges {
    /// Returns `true` if either edit applies.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.heading.is_some() || self.references.is_some()
    }

    /// The edits in application order.
    #[must_use]
    pub fn edits(&self) -> Vec<&Edit> {
        self.heading.iter().chain(self.references.iter()).collect()
    }
}

/// Janitors the note at `path` whose current contents are `text`.
///
/// The heading edit, if any, is applied first and the document rebuilt, so
/// the reference edit addresses the heading-applied text.
///
/// # Errors
///
/// Returns an error if a computed edit does not fit the text it targets.
pub fn janitor_note(
    workspace: &Workspace,
    path: &str,
    text: &str,
    options: JanitorOptions,
) -> Result<NoteChanges> {
    let mut doc = workspace.document(path, text, options.resolve);

    let heading = if options.headings { heading::synthesize(&doc) } else { None };
    if let Some(edit) = &heading {
        let updated = edit.apply(&doc.text, &doc.eol)?;
        doc = workspace.document(path, &updated, options.resolve);
    }

    let sentinel = locate_block(&doc.definitions);
    let references = synchronize(&doc);
    let text = match &references {
        Some(edit) => edit.apply(&doc.text, &doc.eol)?,
        None => doc.text,
    };

    Ok(NoteChanges { path: path.to_string(), heading, references, text, sentinel })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::references::{LINK_REFERENCE_DEFINITION_FOOTER, LINK_REFERENCE_DEFINITION_HEADER};

    fn workspace() -> Workspace {
        Workspace::from_notes(
            "/w",
            [
                ("index.md", "Welcome to [[alpha]].\n"),
                ("alpha.md", "# Alpha\n\nSee [[beta]] and [[ghost]].\n"),
                ("beta.md", "# Beta\n"),
            ],
        )
    }

    fn run(ws: &Workspace, path: &str, text: &str) -> NoteChanges {
        janitor_note(ws, path, text, JanitorOptions::default()).unwrap()
    }

    #[test]
    fn heading_then_references() {
        let ws = workspace();
        let changes = run(&ws, "index.md", &ws.note("index.md").unwrap().text);
        assert!(changes.heading.is_some());
        assert!(changes.references.is_some());
        assert_eq!(
            changes.text,
            format!(
                "# Index\n\nWelcome to [[alpha]].\n\n{LINK_REFERENCE_DEFINITION_HEADER}\n\
                 [alpha]: alpha \"Alpha\"\n{LINK_REFERENCE_DEFINITION_FOOTER}"
            )
        );
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let ws = workspace();
        let first = run(&ws, "alpha.md", &ws.note("alpha.md").unwrap().text);
        assert!(first.is_changed());
        let second = run(&ws, "alpha.md", &first.text);
        assert!(!second.is_changed());
        assert_eq!(second.text, first.text);
        assert_eq!(second.sentinel, SentinelSpan::Found { begin: 0, end: 2 });
    }

    fn converges(ws: &Workspace) -> NoteChanges {
        let first = run(ws, "index.md", &ws.note("index.md").unwrap().text);
        let second = run(ws, "index.md", &first.text);
        assert!(!second.is_changed(), "second pass changed {:?}", first.text);
        assert_eq!(second.text, first.text);
        first
    }

    #[test]
    fn multiline_title_is_folded_and_stable() {
        let ws = Workspace::from_notes(
            "/w",
            [("index.md", "see [[b]]\n"), ("b.md", "---\ntitle: \"Line one\\nLine two\"\n---\n")],
        );
        let first = converges(&ws);
        assert!(first.text.ends_with(&format!(
            "[b]: b \"Line one Line two\"\n{LINK_REFERENCE_DEFINITION_FOOTER}"
        )));
    }

    #[test]
    fn footnote_shaped_link_gets_no_definition() {
        let ws = Workspace::from_notes(
            "/w",
            [("index.md", "# I\n\nsee [[^b]]\n"), ("^b.md", "# B\n")],
        );
        let first = converges(&ws);
        assert!(!first.is_changed());
        assert_eq!(first.text, "# I\n\nsee [[^b]]\n");
    }

    #[test]
    fn wiki_link_in_target_title_is_not_referenced() {
        let ws = Workspace::from_notes(
            "/w",
            [("index.md", "see [[b]]\n"), ("b.md", "# About [[c]]\n"), ("c.md", "# C\n")],
        );
        let first = converges(&ws);
        assert!(first.text.contains("[b]: b \"About [[c]]\""));
        assert!(!first.text.contains("[c]:"));
    }

    #[test]
    fn headings_can_be_disabled() {
        let ws = workspace();
        let options = JanitorOptions { headings: false, ..JanitorOptions::default() };
        let changes = janitor_note(&ws, "beta.md", "no title here", options).unwrap();
        assert_eq!(changes.heading, None);
        assert!(!changes.is_changed());
    }

    #[test]
    fn edits_are_ordered_heading_first() {
        let ws = workspace();
        let changes = run(&ws, "index.md", &ws.note("index.md").unwrap().text);
        let edits = changes.edits();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].new_text, "# Index\n\n");
    }

    #[test]
    fn options_follow_config() {
        let config = JanitorConfig {
            include_extensions: true,
            headings: false,
            ..JanitorConfig::default()
        };
        let options = JanitorOptions::from(&config);
        assert!(options.resolve.include_extensions);
        assert!(!options.headings);
    }
}
