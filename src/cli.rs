//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `mdjanitor`.
#[derive(Debug, Parser)]
#[command(
    name = "mdjanitor",
    version,
    about = "Keep markdown notes tidy: headings, link references, file names"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add missing headings and refresh autogenerated link references.
    Sync(SyncArgs),
    /// Rename notes to their canonical slug form.
    Rename {
        /// Workspace root.
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Print the renames without performing them.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the edits `sync` would make to one note, as JSON.
    Edits {
        /// The note to inspect.
        file: PathBuf,
        /// Workspace root; defaults to the note's directory.
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

/// Arguments of `mdjanitor sync`.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Workspace root.
    #[arg(default_value = ".")]
    pub root: PathBuf,
    /// Print what would change without writing.
    #[arg(long)]
    pub dry_run: bool,
    /// Fail if any note would change or has a malformed block.
    #[arg(long)]
    pub check: bool,
    /// Keep `.md` on generated reference targets.
    #[arg(long)]
    pub include_extensions: bool,
    /// Do not insert missing headings.
    #[arg(long)]
    pub no_headings: bool,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_sync_with_defaults() {
        let cli = Cli::parse_from(["mdjanitor", "sync"]);
        let Command::Sync(args) = cli.command else {
            panic!("expected sync");
        };
        assert_eq!(args.root.to_str(), Some("."));
        assert!(!args.dry_run && !args.check && !args.include_extensions && !args.no_headings);
    }

    #[test]
    fn parses_sync_flags() {
        let cli = Cli::parse_from([
            "mdjanitor",
            "sync",
            "notes",
            "--check",
            "--include-extensions",
            "--no-headings",
        ]);
        let Command::Sync(args) = cli.command else {
            panic!("expected sync");
        };
        assert_eq!(args.root.to_str(), Some("notes"));
        assert!(args.check && args.include_extensions && args.no_headings);
    }

    #[test]
    fn parses_rename_dry_run() {
        let cli = Cli::parse_from(["mdjanitor", "rename", "--dry-run"]);
        assert!(matches!(cli.command, Command::Rename { dry_run: true, .. }));
    }

    #[test]
    fn edits_requires_file() {
        assert!(Cli::try_parse_from(["mdjanitor", "edits"]).is_err());
        let cli = Cli::parse_from(["mdjanitor", "edits", "a.md", "--root", "w"]);
        assert!(matches!(cli.command, Command::Edits { root: Some(_), .. }));
    }
}
