//! Port traits defining external boundaries.
//!
//! The janitor core is pure; the only boundary it crosses is the
//! filesystem holding the notes. Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{FileSystem, FsError};
