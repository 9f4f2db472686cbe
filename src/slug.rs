//! Slug generation for file names and headings.
//!
//! [`slugify`] is the stateless base transform. [`Slugger`] adds collision
//! handling: identical inputs within one batch get `-1`, `-2`, ... suffixes.
//! A `Slugger` covers one batch at a time (one directory, one document) and
//! [`Slugger::reset`] starts the next; there is no shared instance.

use std::collections::HashMap;

/// Converts `input` to its canonical slug form.
///
/// Lowercases, keeps alphanumerics (including non-ASCII letters and digits),
/// `-` and `_`, turns whitespace runs into a single hyphen, collapses hyphen
/// runs and trims hyphens from both ends.
///
/// ```
/// use mdjanitor::slug::slugify;
///
/// assert_eq!(slugify("My File"), "my-file");
/// assert_eq!(slugify("  Hello,   World! "), "hello-world");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_alphanumeric() || c == '_' {
            out.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-') && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Stateful slug generator that disambiguates repeated slugs.
#[derive(Debug, Default)]
pub struct Slugger {
    /// Base slug -> number of suffixed repeats handed out so far.
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a slugger with an empty collision table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugs `input`, appending `-N` when the slug was already produced by
    /// this instance.
    ///
    /// Suffixed results are reserved as well, so a later input that slugs to
    /// `foo-1` directly becomes `foo-1-1` instead of colliding.
    pub fn slug(&mut self, input: &str) -> String {
        let base = slugify(input);
        let mut candidate = base.clone();
        while self.occurrences.contains_key(&candidate) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.occurrences.insert(candidate.clone(), 0);
        candidate
    }

    /// Returns the slug for `filename`, or `None` when the name is already in
    /// canonical form and needs no rename.
    pub fn canonicalize(&mut self, filename: &str) -> Option<String> {
        let slug = self.slug(filename);
        (slug != filename).then_some(slug)
    }

    /// Forgets every slug handed out so far.
    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("API: Authentication (v2)"), "api-authentication-v2");
        assert_eq!(slugify("My File.md"), "my-filemd");
    }

    #[test]
    fn slugify_collapses_runs() {
        assert_eq!(slugify("a   b"), "a-b");
        assert_eq!(slugify("a - - b"), "a-b");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn slugify_keeps_underscores_and_unicode_letters() {
        assert_eq!(slugify("snake_case"), "snake_case");
        assert_eq!(slugify("Über Cool"), "über-cool");
    }

    #[test]
    fn slugify_empty_for_punctuation_only() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn repeated_inputs_get_numeric_suffixes() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Overview"), "overview");
        assert_eq!(slugger.slug("Overview"), "overview-1");
        assert_eq!(slugger.slug("overview"), "overview-2");
    }

    #[test]
    fn suffixed_slugs_are_reserved() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("foo"), "foo");
        assert_eq!(slugger.slug("foo"), "foo-1");
        assert_eq!(slugger.slug("foo 1"), "foo-1-1");
    }

    #[test]
    fn separate_instances_do_not_share_history() {
        let mut first = Slugger::new();
        let mut second = Slugger::new();
        assert_eq!(first.slug("Intro"), "intro");
        assert_eq!(second.slug("Intro"), "intro");
    }

    #[test]
    fn reset_clears_history() {
        let mut slugger = Slugger::new();
        slugger.slug("intro");
        slugger.reset();
        assert_eq!(slugger.slug("intro"), "intro");
    }

    #[test]
    fn canonicalize_returns_slug_for_non_canonical_name() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.canonicalize("My File.md"), Some("my-filemd".to_string()));
    }

    #[test]
    fn canonicalize_returns_none_for_canonical_name() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.canonicalize("already-kebab"), None);
    }
}
