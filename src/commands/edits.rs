//! `mdjanitor edits` command.

use std::path::{Component, Path, PathBuf};

use super::load_workspace;
use crate::context::ServiceContext;
use crate::janitor::{janitor_note, JanitorOptions};

/// Execute the `edits` command: print the pending edits for one note.
///
/// Output is a JSON array, heading edit first. The reference edit addresses
/// the text as it reads after the heading edit.
///
/// # Errors
///
/// Returns an error string if the note is outside the workspace or cannot be
/// read.
pub fn run_with_context(
    ctx: &ServiceContext,
    file: &Path,
    root: Option<&Path>,
) -> Result<(), String> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    };
    let relative = note_path(&root, file).ok_or_else(|| {
        format!("{} is not inside workspace {}", file.display(), root.display())
    })?;

    let (config, workspace) = load_workspace(ctx, &root)?;
    let text = match workspace.note(&relative) {
        Some(note) => note.text.clone(),
        None => ctx
            .fs
            .read_to_string(file)
            .map_err(|e| format!("Failed to read {}: {e}", file.display()))?,
    };

    let changes = janitor_note(&workspace, &relative, &text, JanitorOptions::from(&config))
        .map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&changes.edits())
        .map_err(|e| format!("Failed to serialize edits: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Root-relative, `/`-separated path of `file`, ignoring `.` components.
fn note_path(root: &Path, file: &Path) -> Option<String> {
    let normal = |path: &Path| -> PathBuf {
        path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
    };
    let relative = normal(file).strip_prefix(normal(root)).ok()?.to_path_buf();
    let parts: Vec<String> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    (!parts.is_empty()).then(|| parts.join("/"))
}
