//! `mdjanitor rename` command.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use super::load_workspace;
use crate::context::ServiceContext;
use crate::slug::{slugify, Slugger};
use crate::workspace::Note;

/// A planned rename inside the workspace, both paths root-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Current path.
    pub from: String,
    /// Canonical path.
    pub to: String,
}

/// Execute the `rename` command.
///
/// # Errors
///
/// Returns an error string if the workspace cannot be loaded or a rename
/// fails.
pub fn run_with_context(ctx: &ServiceContext, root: &Path, dry_run: bool) -> Result<(), String> {
    let (_, workspace) = load_workspace(ctx, root)?;
    let renames = plan(workspace.notes());

    if renames.is_empty() {
        println!("All note names are canonical.");
        return Ok(());
    }

    for rename in renames {
        let from = workspace.full_path(&rename.from);
        let to = workspace.full_path(&rename.to);
        if ctx.fs.exists(&to) {
            warn!(from = %rename.from, to = %rename.to, "target exists, skipping rename");
            println!("skipped {} (target {} exists)", rename.from, rename.to);
            continue;
        }
        if dry_run {
            println!("would rename {} -> {}", rename.from, rename.to);
            continue;
        }
        ctx.fs
            .rename(&from, &to)
            .map_err(|e| format!("Failed to rename {}: {e}", from.display()))?;
        info!(from = %rename.from, to = %rename.to, "renamed");
        println!("renamed {} -> {}", rename.from, rename.to);
    }
    Ok(())
}

/// Plans renames for every note whose stem is not in slug form.
///
/// One [`Slugger`] serves every directory and is reset between them, so
/// collisions only count within a directory. Names that are already
/// canonical claim their slugs first, so a rename never collides with them.
#[must_use]
pub fn plan(notes: &[Note]) -> Vec<Rename> {
    let mut by_dir: BTreeMap<&str, Vec<&Note>> = BTreeMap::new();
    for note in notes {
        let dir = note.path.rfind('/').map_or("", |idx| &note.path[..idx]);
        by_dir.entry(dir).or_default().push(note);
    }

    let mut renames = Vec::new();
    let mut slugger = Slugger::new();
    for (dir, notes) in by_dir {
        slugger.reset();
        let (canonical, pending): (Vec<&Note>, Vec<&Note>) =
            notes.into_iter().partition(|note| slugify(&note.identifier) == note.identifier);
        for note in canonical {
            slugger.slug(&note.identifier);
        }
        for note in pending {
            let Some(stem) = slugger.canonicalize(&note.identifier) else {
                continue;
            };
            if stem.is_empty() {
                warn!(note = %note.path, "name has no sluggable characters");
                continue;
            }
            let extension = note.path.rsplit_once('.').map_or("", |(_, ext)| ext);
            let name = format!("{stem}.{extension}");
            let to = if dir.is_empty() { name } else { format!("{dir}/{name}") };
            renames.push(Rename { from: note.path.clone(), to });
        }
    }
    renames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::workspace::Workspace;

    fn renames(paths: &[&str]) -> Vec<(String, String)> {
        let ws = Workspace::from_notes("/w", paths.iter().map(|p| (*p, "")));
        plan(ws.notes()).into_iter().map(|r| (r.from, r.to)).collect()
    }

    #[test]
    fn canonical_names_are_left_alone() {
        assert!(renames(&["my-file.md", "sub/other_note.md"]).is_empty());
    }

    #[test]
    fn non_canonical_names_are_slugged() {
        assert_eq!(
            renames(&["My File.md", "sub/Another Note.markdown"]),
            vec![
                ("My File.md".to_string(), "my-file.md".to_string()),
                ("sub/Another Note.markdown".to_string(), "sub/another-note.markdown".to_string()),
            ]
        );
    }

    #[test]
    fn existing_canonical_name_claims_its_slug() {
        assert_eq!(
            renames(&["My File.md", "my-file.md"]),
            vec![("My File.md".to_string(), "my-file-1.md".to_string())]
        );
    }

    #[test]
    fn collisions_are_per_directory() {
        assert_eq!(
            renames(&["a/My Note.md", "b/My Note.md", "b/my  note!.md"]),
            vec![
                ("a/My Note.md".to_string(), "a/my-note.md".to_string()),
                ("b/My Note.md".to_string(), "b/my-note.md".to_string()),
                ("b/my  note!.md".to_string(), "b/my-note-1.md".to_string()),
            ]
        );
    }

    #[test]
    fn canonical_name_in_one_directory_does_not_claim_another() {
        assert_eq!(
            renames(&["a/intro.md", "a/x.md", "b/Intro.md"]),
            vec![("b/Intro.md".to_string(), "b/intro.md".to_string())]
        );
    }

    #[test]
    fn unsluggable_names_are_skipped() {
        assert!(renames(&["!!!.md"]).is_empty());
    }

    #[test]
    fn rename_moves_files() {
        let ctx = ServiceContext::with_fs(MemoryFileSystem::with_files([
            ("/w/My Note.md", "one"),
            ("/w/Other.md", "two"),
            ("/w/other.markdown", "three"),
        ]));
        run_with_context(&ctx, Path::new("/w"), false).unwrap();

        assert!(!ctx.fs.exists(Path::new("/w/My Note.md")));
        assert_eq!(ctx.fs.read_to_string(Path::new("/w/my-note.md")).unwrap(), "one");
        assert_eq!(ctx.fs.read_to_string(Path::new("/w/other-1.md")).unwrap(), "two");
        assert_eq!(ctx.fs.read_to_string(Path::new("/w/other.markdown")).unwrap(), "three");
    }

    #[test]
    fn existing_target_outside_workspace_is_not_overwritten() {
        let ctx = ServiceContext::with_fs(MemoryFileSystem::with_files([
            ("/w/.mdjanitor.yaml", "ignore: [my-note.md]\n"),
            ("/w/My Note.md", "one"),
            ("/w/my-note.md", "kept"),
        ]));
        run_with_context(&ctx, Path::new("/w"), false).unwrap();

        assert_eq!(ctx.fs.read_to_string(Path::new("/w/My Note.md")).unwrap(), "one");
        assert_eq!(ctx.fs.read_to_string(Path::new("/w/my-note.md")).unwrap(), "kept");
    }

    #[test]
    fn dry_run_keeps_files() {
        let ctx = ServiceContext::with_fs(MemoryFileSystem::with_files([("/w/My Note.md", "one")]));
        run_with_context(&ctx, Path::new("/w"), true).unwrap();
        assert!(ctx.fs.exists(Path::new("/w/My Note.md")));
    }
}
