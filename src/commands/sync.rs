//! `mdjanitor sync` command.

use tracing::{debug, info};

use super::load_workspace;
use crate::cli::SyncArgs;
use crate::context::ServiceContext;
use crate::janitor::{janitor_note, JanitorOptions};

/// Execute the `sync` command.
///
/// Every note gets a heading if it lacks one (unless disabled) and then a
/// refreshed link reference block. Changed notes are written back unless
/// `--dry-run` or `--check` is given.
///
/// # Errors
///
/// Returns an error string if the workspace cannot be loaded, a note cannot
/// be written, or `--check` finds work to do.
pub fn run_with_context(ctx: &ServiceContext, args: &SyncArgs) -> Result<(), String> {
    let (mut config, workspace) = load_workspace(ctx, &args.root)?;
    if args.include_extensions {
        config.include_extensions = true;
    }
    if args.no_headings {
        config.headings = false;
    }
    let options = JanitorOptions::from(&config);
    let write = !(args.dry_run || args.check);

    let mut changed = Vec::new();
    let mut malformed = Vec::new();
    for note in workspace.notes() {
        let changes = janitor_note(&workspace, &note.path, &note.text, options)
            .map_err(|e| format!("{}: {e}", note.path))?;

        if let Err(err) = changes.sentinel.into_result() {
            malformed.push(format!("{}: {err}", note.path));
        }
        if !changes.is_changed() {
            debug!(note = %note.path, "already tidy");
            continue;
        }

        if write {
            let full = workspace.full_path(&note.path);
            ctx.fs
                .write(&full, &changes.text)
                .map_err(|e| format!("Failed to write {}: {e}", full.display()))?;
            info!(note = %note.path, "updated");
            println!("updated {}", note.path);
        } else {
            println!("would update {}", note.path);
        }
        changed.push(note.path.clone());
    }

    if changed.is_empty() {
        println!("All {} notes are tidy.", workspace.notes().len());
    }

    if args.check && !(changed.is_empty() && malformed.is_empty()) {
        let mut problems = Vec::new();
        if !changed.is_empty() {
            problems.push(format!("{} note(s) need syncing", changed.len()));
        }
        problems.extend(malformed);
        return Err(problems.join("\n"));
    }
    Ok(())
}
