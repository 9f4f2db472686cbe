//! The set of notes under one root directory.
//!
//! A [`Workspace`] is the knowledge graph the synchronizer consults: it knows
//! every note, its title and where it lives, and turns a note's wiki links
//! into [`ResolvedReference`](crate::references::ResolvedReference)s.

pub mod resolve;

pub use resolve::{encode_target, relative_path, resolve_relative, ResolveOptions};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::JanitorConfig;
use crate::context::ServiceContext;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::heading::heading_from_identifier;
use crate::markdown::{self, Scan};

/// File extensions treated as notes.
pub const NOTE_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// One markdown file of the workspace.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path relative to the workspace root, `/`-separated.
    pub path: String,
    /// File stem.
    pub identifier: String,
    /// Text as loaded.
    pub text: String,
    /// Scan of `text`.
    pub scan: Scan,
}

impl Note {
    /// Creates a note from its root-relative path and text.
    #[must_use]
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let path = path.into();
        let text = text.into();
        let identifier = identifier_of(&path);
        let scan = markdown::scan(&text);
        Self { path, identifier, text, scan }
    }

    /// The authored title, or the heading derived from the identifier.
    #[must_use]
    pub fn title(&self) -> String {
        self.scan.title.clone().unwrap_or_else(|| heading_from_identifier(&self.identifier))
    }
}

/// All notes under a root directory, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    root: PathBuf,
    notes: Vec<Note>,
}

impl Workspace {
    /// Builds a workspace from in-memory `(path, text)` pairs.
    ///
    /// Paths are relative to `root`.
    #[must_use]
    pub fn from_notes<P, T>(
        root: impl Into<PathBuf>,
        notes: impl IntoIterator<Item = (P, T)>,
    ) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        let mut notes: Vec<Note> = notes.into_iter().map(|(p, t)| Note::new(p, t)).collect();
        notes.sort_by(|a, b| a.path.cmp(&b.path));
        Self { root: root.into(), notes }
    }

    /// Loads every note under `root` through the context's filesystem.
    ///
    /// Entries named in `config.ignore` are skipped at any depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory cannot be listed or a note
    /// cannot be read.
    pub fn load(ctx: &ServiceContext, root: &Path, config: &JanitorConfig) -> Result<Self> {
        let mut paths = Vec::new();
        collect_notes(ctx, root, "", config, &mut paths)?;

        let mut notes = Vec::with_capacity(paths.len());
        for path in paths {
            let full = root.join(&path);
            let text = ctx.fs.read_to_string(&full).map_err(|e| Error::Io {
                path: full.display().to_string(),
                message: e.to_string(),
            })?;
            notes.push((path, text));
        }
        debug!(root = %root.display(), notes = notes.len(), "loaded workspace");
        Ok(Self::from_notes(root, notes))
    }

    /// Root directory of the workspace.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every note, sorted by path.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up a note by its root-relative path.
    #[must_use]
    pub fn note(&self, path: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.path == path)
    }

    /// Absolute location of a root-relative note path.
    #[must_use]
    pub fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Assembles the core input for the note at `path` with the given text.
    ///
    /// `text` need not be the text the workspace loaded, which lets callers
    /// rebuild a document after applying an edit. Links resolve against the
    /// rest of the workspace as loaded.
    #[must_use]
    pub fn document(&self, path: &str, text: &str, options: ResolveOptions) -> Document {
        let scan = markdown::scan(text);
        let references = self.references(path, &scan.links, options);
        scan.into_document(text, identifier_of(path), references)
    }
}

/// File stem of a `/`-separated path.
fn identifier_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    resolve::strip_note_extension(name).to_string()
}

/// Returns `true` for names ending in a note extension.
#[must_use]
pub fn is_note(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| NOTE_EXTENSIONS.iter().any(|n| ext.eq_ignore_ascii_case(n)))
}

fn collect_notes(
    ctx: &ServiceContext,
    root: &Path,
    relative: &str,
    config: &JanitorConfig,
    out: &mut Vec<String>,
) -> Result<()> {
    let dir = if relative.is_empty() { root.to_path_buf() } else { root.join(relative) };
    let entries = ctx.fs.list_dir(&dir).map_err(|e| Error::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    for name in entries {
        if config.is_ignored(&name) {
            continue;
        }
        let child = if relative.is_empty() { name.clone() } else { format!("{relative}/{name}") };
        if ctx.fs.is_dir(&root.join(&child)) {
            collect_notes(ctx, root, &child, config, out)?;
        } else if is_note(&name) {
            out.push(child);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    fn memory_ctx() -> ServiceContext {
        ServiceContext::with_fs(MemoryFileSystem::with_files([
            ("/w/index.md", "# Index\n[[ideas]]\n"),
            ("/w/notes/ideas.markdown", "Some ideas\n"),
            ("/w/notes/image.png", "binary"),
            ("/w/.git/HEAD.md", "ignored"),
            ("/w/node_modules/pkg/readme.md", "ignored"),
            ("/w/archive/old.md", "old"),
        ]))
    }

    #[test]
    fn load_walks_tree_and_skips_ignored() {
        let ctx = memory_ctx();
        let ws = Workspace::load(&ctx, Path::new("/w"), &JanitorConfig::default()).unwrap();
        let paths: Vec<&str> = ws.notes().iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["archive/old.md", "index.md", "notes/ideas.markdown"]);
    }

    #[test]
    fn load_honors_custom_ignore() {
        let ctx = memory_ctx();
        let config = JanitorConfig {
            ignore: vec![".git".into(), "node_modules".into(), "archive".into()],
            ..JanitorConfig::default()
        };
        let ws = Workspace::load(&ctx, Path::new("/w"), &config).unwrap();
        assert!(ws.note("archive/old.md").is_none());
    }

    #[test]
    fn load_fails_for_missing_root() {
        let ctx = memory_ctx();
        let err = Workspace::load(&ctx, Path::new("/missing"), &JanitorConfig::default());
        assert!(matches!(err, Err(Error::Io { .. })));
    }

    #[test]
    fn note_identifier_and_title() {
        let ws = Workspace::from_notes("/w", [("a/my-note.md", "body"), ("b.md", "# Bee\n")]);
        let note = ws.note("a/my-note.md").unwrap();
        assert_eq!(note.identifier, "my-note");
        assert_eq!(note.title(), "My Note");
        assert_eq!(ws.note("b.md").unwrap().title(), "Bee");
    }

    #[test]
    fn document_uses_given_text() {
        let ws = Workspace::from_notes("/w", [("a.md", "[[b]]"), ("b.md", "# B\n")]);
        let doc = ws.document("a.md", "# A\n\n[[b]]\n", ResolveOptions::default());
        assert_eq!(doc.title.as_deref(), Some("A"));
        assert_eq!(doc.identifier, "a");
        assert_eq!(doc.references.len(), 1);
        assert_eq!(doc.references[0].target, "b");
    }

    #[test]
    fn is_note_matches_extensions() {
        assert!(is_note("a.md"));
        assert!(is_note("a.MD"));
        assert!(is_note("a.markdown"));
        assert!(!is_note("a.txt"));
        assert!(!is_note("md"));
    }
}
