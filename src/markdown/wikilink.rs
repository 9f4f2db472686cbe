//! Wiki link extraction.

use super::patterns::WIKILINK_RE;

/// A `[[target#section|alias]]` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// Everything between the double brackets, as written.
    pub raw: String,
    /// Page name part, trimmed.
    pub target: String,
    /// Text after `#`, if any.
    pub section: Option<String>,
    /// Text after `|`, if any.
    pub alias: Option<String>,
    /// Zero-based line the link appears on.
    pub line: usize,
}

impl WikiLink {
    /// Splits the inner text of a wiki link into its parts.
    #[must_use]
    pub fn parse(raw: &str, line: usize) -> Self {
        let (page, alias) = match raw.split_once('|') {
            Some((page, alias)) => (page, Some(alias.trim().to_string())),
            None => (raw, None),
        };
        let (target, section) = match page.split_once('#') {
            Some((target, section)) => (target, Some(section.trim().to_string())),
            None => (page, None),
        };
        Self {
            raw: raw.to_string(),
            target: target.trim().to_string(),
            section: section.filter(|s| !s.is_empty()),
            alias: alias.filter(|a| !a.is_empty()),
            line,
        }
    }
}

/// Extracts wiki links from one line of prose.
///
/// Links inside inline code spans are skipped.
pub fn extract_from_line(line: &str, line_number: usize, out: &mut Vec<WikiLink>) {
    let masked = mask_inline_code(line);
    for caps in WIKILINK_RE.captures_iter(&masked) {
        let Some(inner) = caps.get(1) else {
            continue;
        };
        // Masking keeps byte offsets, so the span indexes the original line.
        out.push(WikiLink::parse(&line[inner.range()], line_number));
    }
}

/// Replaces the contents of inline code spans with spaces, keeping byte
/// offsets intact.
fn mask_inline_code(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('`') {
        let ticks = rest[open..].bytes().take_while(|&b| b == b'`').count();
        let fence = &rest[open..open + ticks];
        let after = &rest[open + ticks..];
        let Some(close) = after.find(fence) else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&" ".repeat(ticks + close + ticks));
        rest = &after[close + ticks..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(line: &str) -> Vec<WikiLink> {
        let mut out = Vec::new();
        extract_from_line(line, 0, &mut out);
        out
    }

    #[test]
    fn extracts_simple_link() {
        let found = links("see [[Note]] here");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw, "Note");
        assert_eq!(found[0].target, "Note");
    }

    #[test]
    fn extracts_multiple_links_in_order() {
        let targets: Vec<String> =
            links("[[One]] and [[Two]]").into_iter().map(|l| l.target).collect();
        assert_eq!(targets, vec!["One", "Two"]);
    }

    #[test]
    fn splits_section_and_alias() {
        let link = &links("[[Note#Intro|Read me]]")[0];
        assert_eq!(link.raw, "Note#Intro|Read me");
        assert_eq!(link.target, "Note");
        assert_eq!(link.section.as_deref(), Some("Intro"));
        assert_eq!(link.alias.as_deref(), Some("Read me"));
    }

    #[test]
    fn ignores_empty_brackets() {
        assert!(links("[[]]").is_empty());
    }

    #[test]
    fn skips_inline_code() {
        let found = links("See `[[Fake]]` but [[Real]]");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, "Real");
    }

    #[test]
    fn double_backtick_spans_are_masked() {
        let found = links("``[[Fake]] ` x`` then [[Real]]");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, "Real");
    }

    #[test]
    fn unmatched_backtick_does_not_hide_links() {
        let found = links("a ` stray [[Real]]");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn masking_preserves_multibyte_offsets() {
        let found = links("`ü` [[Über]]");
        assert_eq!(found[0].target, "Über");
    }

    #[test]
    fn relative_targets_are_kept() {
        assert_eq!(links("[[../Ideas]]")[0].target, "../Ideas");
    }
}
