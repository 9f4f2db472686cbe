//! Error types for mdjanitor operations.

use thiserror::Error;

/// Errors that can occur while applying edits or loading a workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A position does not address a location inside the text.
    #[error("position {line}:{character} is outside the document")]
    PositionOutOfBounds {
        /// Zero-based line.
        line: usize,
        /// Zero-based byte offset within the line.
        character: usize,
    },

    /// An edit range whose start lies after its end.
    #[error("edit range starts after it ends")]
    InvertedRange,

    /// The autogenerated block has a sentinel without its partner.
    #[error("malformed autogenerated block: {0}")]
    MalformedBlock(String),

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {message}")]
    Io {
        /// Path that was being accessed.
        path: String,
        /// Underlying error message.
        message: String,
    },
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;
