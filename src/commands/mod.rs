//! Command dispatch and handlers.

pub mod edits;
pub mod rename;
pub mod sync;

use std::path::Path;

use crate::cli::Command;
use crate::config::JanitorConfig;
use crate::context::ServiceContext;
use crate::workspace::Workspace;

/// Dispatch a parsed command to its handler against the real disk.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    dispatch_with_context(command, &ServiceContext::live())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Sync(args) => sync::run_with_context(ctx, args),
        Command::Rename { root, dry_run } => rename::run_with_context(ctx, root, *dry_run),
        Command::Edits { file, root } => edits::run_with_context(ctx, file, root.as_deref()),
    }
}

/// Loads the configuration and every note under `root`.
fn load_workspace(
    ctx: &ServiceContext,
    root: &Path,
) -> Result<(JanitorConfig, Workspace), String> {
    let config = JanitorConfig::load(&*ctx.fs, root).map_err(|e| e.to_string())?;
    let workspace = Workspace::load(ctx, root, &config).map_err(|e| e.to_string())?;
    Ok((config, workspace))
}
