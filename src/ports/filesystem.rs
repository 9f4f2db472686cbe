//! Filesystem port for note I/O.

use std::path::Path;

/// Boxed error returned by filesystem adapters.
pub type FsError = Box<dyn std::error::Error + Send + Sync>;

/// Provides filesystem access for reading, writing and renaming notes.
///
/// Abstracting the filesystem lets the workspace and commands run against
/// an in-memory tree in tests.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, FsError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), FsError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, FsError>;

    /// Moves a file from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing or the move fails.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;
}
