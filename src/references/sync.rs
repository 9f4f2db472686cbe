//! Link reference block synchronization.
//!
//! Reconciles the definitions already present at the bottom of a document
//! with the references its links currently resolve to. The result is at most
//! one [`Edit`]; `None` means the document is already consistent.
//!
//! The engine owns only the sentinel-wrapped block it generated earlier.
//! Every other definition is manual content: it is re-serialized in its
//! original order and never dropped.

use tracing::{debug, warn};

use super::format::{render_block, stringify_all, LinkDefinition};
use crate::document::Document;
use crate::edit::{Edit, Range};
use crate::error::{Error, Result};

/// Where the previously generated block sits among the definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelSpan {
    /// A `//begin` ... `//end` pair, indices inclusive.
    Found {
        /// Index of the `//begin` sentinel.
        begin: usize,
        /// Index of the `//end` sentinel.
        end: usize,
    },
    /// An `//end` sentinel with no `//begin` before it.
    BeginMissing {
        /// Index of the orphaned `//end`.
        end: usize,
    },
    /// A `//begin` sentinel with no `//end` after it.
    EndMissing {
        /// Index of the orphaned `//begin`.
        begin: usize,
    },
    /// No sentinel at all.
    NoBlock,
}

impl SentinelSpan {
    /// Returns `true` for the half-present variants.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::BeginMissing { .. } | Self::EndMissing { .. })
    }

    /// Converts the span into the inclusive index pair of a well-formed block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBlock`] when only one sentinel is present.
    pub fn into_result(self) -> Result<Option<(usize, usize)>> {
        match self {
            Self::Found { begin, end } => Ok(Some((begin, end))),
            Self::NoBlock => Ok(None),
            Self::BeginMissing { end } => {
                Err(Error::MalformedBlock(format!("definition {end} closes a block never opened")))
            }
            Self::EndMissing { begin } => {
                Err(Error::MalformedBlock(format!("definition {begin} opens a block never closed")))
            }
        }
    }
}

/// Locates the autogenerated block.
///
/// The block is the *last* `//end` paired with the nearest `//begin` before
/// it. Generated blocks are always written after the manual definitions, so
/// stray sentinels earlier in the list stay manual content.
#[must_use]
pub fn locate_block(definitions: &[LinkDefinition]) -> SentinelSpan {
    match definitions.iter().rposition(LinkDefinition::is_end) {
        Some(end) => match definitions[..end].iter().rposition(LinkDefinition::is_begin) {
            Some(begin) => SentinelSpan::Found { begin, end },
            None => SentinelSpan::BeginMissing { end },
        },
        None => match definitions.iter().rposition(LinkDefinition::is_begin) {
            Some(begin) => SentinelSpan::EndMissing { begin },
            None => SentinelSpan::NoBlock,
        },
    }
}

/// Observations the merge decision is made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Facts {
    /// The document already contains definitions.
    pub has_definitions: bool,
    /// The document's links resolve to at least one reference.
    pub has_references: bool,
    /// A `//begin` sentinel is present anywhere.
    pub has_begin: bool,
    /// Definitions outside the generated block exist.
    pub has_manual: bool,
    /// The replacement text equals what is already there.
    pub unchanged: bool,
}

/// What to do with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the document alone.
    Keep,
    /// Append a fresh block at the end of the document.
    Insert,
    /// Replace the whole definitions span.
    Replace,
}

impl Decision {
    /// The merge decision table. Rows are checked top to bottom.
    ///
    /// | definitions | references | begin | manual | unchanged | decision |
    /// |-------------|------------|-------|--------|-----------|----------|
    /// | no          | no         | -     | -      | -         | Keep     |
    /// | no          | yes        | -     | -      | -         | Insert   |
    /// | yes         | no         | no    | yes    | -         | Keep     |
    /// | yes         | -          | -     | -      | yes       | Keep     |
    /// | yes         | no         | -     | yes    | -         | Keep     |
    /// | yes         | -          | -     | -      | no        | Replace  |
    #[must_use]
    pub fn from_facts(facts: Facts) -> Self {
        match facts {
            Facts { has_definitions: false, has_references: false, .. } => Self::Keep,
            Facts { has_definitions: false, has_references: true, .. } => Self::Insert,
            // Hand-written definitions only, nothing to link: not ours to touch.
            Facts { has_references: false, has_begin: false, has_manual: true, .. } => Self::Keep,
            Facts { unchanged: true, .. } => Self::Keep,
            // Never wipe manual definitions just because no link is live.
            Facts { has_references: false, has_manual: true, .. } => Self::Keep,
            Facts { .. } => Self::Replace,
        }
    }
}

/// Computes the edit that brings the document's reference block in sync.
///
/// Returns `None` when the document is already consistent. The returned
/// edit either appends a new block at the end of the document or replaces
/// the span from the first to the last existing definition.
#[must_use]
pub fn synchronize(doc: &Document) -> Option<Edit> {
    let eol = doc.eol.as_str();
    let block = render_block(&doc.references, eol);
    let definitions = &doc.definitions;

    let span = locate_block(definitions);
    if span.is_malformed() {
        warn!(identifier = %doc.identifier, ?span, "ignoring malformed autogenerated block");
    }

    let manual: Vec<&LinkDefinition> = match span {
        SentinelSpan::Found { begin, end } => {
            definitions[..begin].iter().chain(&definitions[end + 1..]).collect()
        }
        _ => definitions.iter().collect(),
    };

    let full_text = if !manual.is_empty() && !block.is_empty() {
        format!("{}{eol}{block}", stringify_all(manual.iter().copied(), eol))
    } else {
        block.clone()
    };
    let old_text = stringify_all(definitions, eol);

    let facts = Facts {
        has_definitions: !definitions.is_empty(),
        has_references: !doc.references.is_empty(),
        has_begin: definitions.iter().any(LinkDefinition::is_begin),
        has_manual: !manual.is_empty(),
        unchanged: old_text == block || old_text == full_text,
    };
    let decision = Decision::from_facts(facts);
    debug!(identifier = %doc.identifier, ?facts, ?decision, "link reference decision");

    match decision {
        Decision::Keep => None,
        Decision::Insert => {
            let padding = if doc.end.character == 0 { eol.to_string() } else { eol.repeat(2) };
            Some(Edit::insert(doc.end, format!("{padding}{block}")))
        }
        Decision::Replace => {
            let start = definitions.first().and_then(|d| d.range)?.start;
            let end = definitions.last().and_then(|d| d.range)?.end;
            Some(Edit::replace(Range::new(start, end), full_text))
        }
    }
}
