//! Heading synthesis for documents that lack a title.

use crate::document::Document;
use crate::edit::Edit;
use crate::slug::slugify;

/// Title-cases words separated by whitespace, `-` or `_`.
///
/// ```
/// use mdjanitor::heading::title_case;
///
/// assert_eq!(title_case("my-first_note"), "My First Note");
/// ```
#[must_use]
pub fn title_case(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// The heading text a document named `identifier` would get.
#[must_use]
pub fn heading_from_identifier(identifier: &str) -> String {
    let slug = slugify(identifier);
    if slug.is_empty() {
        return identifier.trim().to_string();
    }
    title_case(&slug)
}

/// Computes the edit inserting a `# Title` line when the document has none.
///
/// The heading goes at `content_start`. After front matter it is preceded by
/// a line break; it is followed by a blank line unless one is already there.
#[must_use]
pub fn synthesize(doc: &Document) -> Option<Edit> {
    if doc.title.is_some() {
        return None;
    }

    let eol = doc.eol.as_str();
    let front_matter_exists = doc.content_start.line != 0;
    let blank_line_after_front_matter =
        front_matter_exists && doc.line(doc.content_start.line) == Some("");

    let padding_start = if front_matter_exists { eol } else { "" };
    let padding_end =
        if blank_line_after_front_matter { eol.to_string() } else { eol.repeat(2) };

    let heading = heading_from_identifier(&doc.identifier);
    Some(Edit::insert(doc.content_start, format!("{padding_start}# {heading}{padding_end}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{Position, Range};

    fn front_matter_doc(body: &str) -> Document {
        let text = format!("---\ntags: [a]\ntype: note\nstatus: draft\n---\n{body}");
        let mut doc = Document::new(text, "\n", "heading");
        doc.content_start = Position::new(5, 0);
        doc
    }

    #[test]
    fn title_case_capitalizes_words() {
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case("über-cool"), "Über Cool");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn heading_from_identifier_slugs_first() {
        assert_eq!(heading_from_identifier("My File (draft)"), "My File Draft");
        assert_eq!(heading_from_identifier("!!!"), "!!!");
    }

    #[test]
    fn existing_title_is_never_overridden() {
        let mut doc = Document::new("# Already\n", "\n", "note");
        doc.title = Some("Already".to_string());
        assert_eq!(synthesize(&doc), None);
    }

    #[test]
    fn no_front_matter_inserts_at_top() {
        let doc = Document::new("body text\n", "\n", "my-note");
        let edit = synthesize(&doc).unwrap();
        assert_eq!(edit.range, Range::at(Position::new(0, 0)));
        assert_eq!(edit.new_text, "# My Note\n\n");
    }

    #[test]
    fn front_matter_without_blank_line_gets_double_padding() {
        let doc = front_matter_doc("Body");
        let edit = synthesize(&doc).unwrap();
        assert_eq!(edit.range, Range::at(Position::new(5, 0)));
        assert_eq!(edit.new_text, "\n# Heading\n\n");
        assert_eq!(
            edit.apply(&doc.text, "\n").unwrap(),
            "---\ntags: [a]\ntype: note\nstatus: draft\n---\n\n# Heading\n\nBody"
        );
    }

    #[test]
    fn front_matter_with_blank_line_gets_single_padding() {
        let doc = front_matter_doc("\nBody");
        let edit = synthesize(&doc).unwrap();
        assert_eq!(edit.new_text, "\n# Heading\n");
        assert_eq!(
            edit.apply(&doc.text, "\n").unwrap(),
            "---\ntags: [a]\ntype: note\nstatus: draft\n---\n\n# Heading\n\nBody"
        );
    }

    #[test]
    fn crlf_padding_follows_document() {
        let mut doc = Document::new("---\r\na: 1\r\n---\r\nBody", "\r\n", "crlf");
        doc.content_start = Position::new(3, 0);
        assert_eq!(synthesize(&doc).unwrap().new_text, "\r\n# Crlf\r\n\r\n");
    }
}
