//! Core library for the `mdjanitor` CLI.
//!
//! Keeps a markdown workspace tidy: every note gets a top-level heading,
//! and the wiki links of each note are mirrored into an autogenerated block
//! of reference-style link definitions at its bottom, next to any
//! definitions the author wrote by hand.
//!
//! The core ([`references`], [`heading`], [`slug`], [`edit`]) is pure and
//! works on one [`document::Document`] at a time. [`workspace`] and
//! [`markdown`] build those documents from files reached through the
//! [`ports::FileSystem`] port.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod document;
pub mod edit;
pub mod error;
pub mod heading;
pub mod janitor;
pub mod markdown;
pub mod ports;
pub mod references;
pub mod slug;
pub mod workspace;

pub use error::{Error, Result};

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
/// `--help` and `--version` print to stdout and succeed.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
