//! Reference definition formatting.

use std::borrow::Cow;

use crate::edit::Range;

/// Label of the sentinel that opens an autogenerated block.
pub const BEGIN_LABEL: &str = "//begin";

/// Label of the sentinel that closes an autogenerated block.
pub const END_LABEL: &str = "//end";

/// First line of every autogenerated block.
pub const LINK_REFERENCE_DEFINITION_HEADER: &str =
    r#"[//begin]: # "Autogenerated link references for markdown compatibility""#;

/// Last line of every autogenerated block.
pub const LINK_REFERENCE_DEFINITION_FOOTER: &str = r#"[//end]: # "Autogenerated link references""#;

/// A reference definition found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    /// Text between the brackets.
    pub label: String,
    /// Link destination.
    pub target: String,
    /// Optional link title.
    pub title: Option<String>,
    /// Source span of the definition line, without its line break.
    pub range: Option<Range>,
}

impl LinkDefinition {
    /// Returns `true` for the `//begin` sentinel.
    #[must_use]
    pub fn is_begin(&self) -> bool {
        self.label == BEGIN_LABEL
    }

    /// Returns `true` for the `//end` sentinel.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.label == END_LABEL
    }
}

/// A link of the document resolved against the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// Label the document uses for the link.
    pub label: String,
    /// Destination of the link.
    pub target: String,
    /// Title of the destination, if known.
    pub title: Option<String>,
}

impl ResolvedReference {
    /// Creates a resolved reference.
    #[must_use]
    pub fn new(label: impl Into<String>, target: impl Into<String>, title: Option<String>) -> Self {
        Self { label: label.into(), target: target.into(), title }
    }
}

/// Anything that renders as a single reference definition line.
pub trait ReferenceLine {
    /// The bracketed label.
    fn label(&self) -> &str;
    /// The destination.
    fn target(&self) -> &str;
    /// The optional quoted title.
    fn title(&self) -> Option<&str>;
}

impl ReferenceLine for LinkDefinition {
    fn label(&self) -> &str {
        &self.label
    }
    fn target(&self) -> &str {
        &self.target
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl ReferenceLine for ResolvedReference {
    fn label(&self) -> &str {
        &self.label
    }
    fn target(&self) -> &str {
        &self.target
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Renders `[label]: target "title"`, omitting the title segment when absent.
///
/// Line breaks inside the title fold into single spaces, so the output is
/// always one line.
#[must_use]
pub fn stringify(reference: &impl ReferenceLine) -> String {
    match reference.title() {
        Some(title) => format!(
            "[{}]: {} \"{}\"",
            reference.label(),
            reference.target(),
            single_line(title)
        ),
        None => format!("[{}]: {}", reference.label(), reference.target()),
    }
}

/// Whether `label` can head a definition line that scans back as itself.
///
/// Rejects footnote labels (`^x`), brackets, line breaks and the sentinel
/// labels.
#[must_use]
pub fn is_definition_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('^')
        && !label.contains(['[', ']', '\r', '\n'])
        && label != BEGIN_LABEL
        && label != END_LABEL
}

fn single_line(title: &str) -> Cow<'_, str> {
    if !title.contains(['\r', '\n']) {
        return Cow::Borrowed(title);
    }
    let parts: Vec<&str> =
        title.split(['\r', '\n']).map(str::trim).filter(|part| !part.is_empty()).collect();
    Cow::Owned(parts.join(" "))
}

/// Renders every reference on its own line, joined by `eol`.
#[must_use]
pub fn stringify_all<'a, R>(references: impl IntoIterator<Item = &'a R>, eol: &str) -> String
where
    R: ReferenceLine + 'a,
{
    references.into_iter().map(stringify).collect::<Vec<_>>().join(eol)
}

/// Renders the full autogenerated block for `references`.
///
/// Returns an empty string when there is nothing to reference; otherwise the
/// header, one line per reference and the footer, joined by `eol`.
#[must_use]
pub fn render_block(references: &[ResolvedReference], eol: &str) -> String {
    if references.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(references.len() + 2);
    lines.push(LINK_REFERENCE_DEFINITION_HEADER.to_string());
    lines.extend(references.iter().map(stringify));
    lines.push(LINK_REFERENCE_DEFINITION_FOOTER.to_string());
    lines.join(eol)
}
