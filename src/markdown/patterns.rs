//! Pre-compiled regex patterns for markdown scanning.
//!
//! Uses `LazyLock` so each pattern compiles once on first use.

use std::sync::LazyLock;

use regex::Regex;

/// Single-line reference definition: `[label]: target "title"`.
///
/// Captures: 1 = label, 2 = target, 3/4/5 = title in `"..."`, `'...'` or
/// `(...)` form.
pub static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^ {0,3}\[([^\]]+)\]:[ \t]*(<[^>]*>|\S+)(?:[ \t]+(?:"(.*)"|'(.*)'|\((.*)\)))?[ \t]*$"#,
    )
    .expect("definition pattern is valid")
});

/// Level-one ATX heading. Capture 1 = heading text without closing hashes.
pub static H1_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}#[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("heading pattern is valid")
});

/// Wiki link `[[...]]`. Capture 1 = inner text.
pub static WIKILINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+?)\]\]").expect("wikilink pattern is valid"));

/// Opening or closing code fence. Capture 1 = the fence run.
pub static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("fence pattern is valid"));
