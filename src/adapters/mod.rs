//! Adapters implementing the port traits.
//!
//! `live` talks to the real disk; `memory` keeps a file tree in a map for
//! tests and embedding.

pub mod live;
pub mod memory;
