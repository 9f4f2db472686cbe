//! YAML front matter detection.

use serde::Deserialize;
use tracing::warn;

/// Location and relevant fields of a front matter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// Index of the closing fence line.
    pub closing_line: usize,
    /// `title` field, when present and scalar.
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Fields {
    #[serde(default)]
    title: Option<serde_yaml::Value>,
}

/// Finds a front matter block opened by `---` on the first line and closed
/// by `---` or `...`.
///
/// YAML that fails to parse still delimits the block; only the title is lost.
#[must_use]
pub fn detect(lines: &[&str]) -> Option<FrontMatter> {
    if lines.first().map(|l| l.trim_end()) != Some("---") {
        return None;
    }
    let closing_line = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| matches!(line.trim_end(), "---" | "..."))
        .map(|(idx, _)| idx)?;

    let yaml = lines[1..closing_line].join("\n");
    Some(FrontMatter { closing_line, title: parse_title(&yaml) })
}

fn parse_title(yaml: &str) -> Option<String> {
    if yaml.trim().is_empty() {
        return None;
    }
    let fields: Fields = match serde_yaml::from_str(yaml) {
        Ok(fields) => fields,
        Err(err) => {
            warn!(error = %err, "ignoring unparseable front matter");
            return None;
        }
    };
    let title = match fields.title? {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!title.trim().is_empty()).then_some(title)
}
