//! Reference-style link definitions and the autogenerated block.
//!
//! - [`format`]: single-line definition rendering and the sentinel lines
//! - [`sync`]: the merge that keeps the generated block in step with the
//!   document's links

pub mod format;
pub mod sync;

pub use format::{
    is_definition_label, render_block, stringify, LinkDefinition, ReferenceLine,
    ResolvedReference, LINK_REFERENCE_DEFINITION_FOOTER, LINK_REFERENCE_DEFINITION_HEADER,
};
pub use sync::{locate_block, synchronize, Decision, Facts, SentinelSpan};
