use crate::error::{Result, SuitError};
use crate::markdown::{self, FenceTracker};
use crate::name::ValidName;
use crate::types::Inclusion;

/// Level-2 sections every steering document carries, in order. Mirrors the
/// layout of the bundled documents.
pub const STANDARD_SECTIONS: &[&str] = &[
    "Purpose",
    "Key Concepts",
    "Best Practices",
    "Anti-Patterns",
    "Summary",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub inclusion: Inclusion,
    /// Glob for `fileMatch` inclusion, e.g. `**/*.rs`.
    pub file_match_pattern: Option<String>,
}

impl TemplateMetadata {
    /// Reject metadata that would break the generated structure: headings or
    /// an unclosed code fence in the description, and a missing or stray
    /// file-match pattern. The title is collapsed to one line by `generate`.
    pub fn check(&self) -> Result<()> {
        if let Some(description) = self.description.as_deref() {
            let mut fences = FenceTracker::default();
            for (idx, line) in description.lines().enumerate() {
                let outside = fences.feed(line) == markdown::FenceLine::Outside;
                if outside && markdown::heading_line(line).is_some() {
                    return Err(SuitError::InvalidMetadata(format!(
                        "description line {} is a markdown heading",
                        idx + 1
                    )));
                }
            }
            if fences.is_open() {
                return Err(SuitError::InvalidMetadata(
                    "description has an unclosed code fence".to_string(),
                ));
            }
        }

        let pattern = self.file_match_pattern.as_deref().map(str::trim);
        match (self.inclusion, pattern) {
            (Inclusion::FileMatch, None | Some("")) => Err(SuitError::InvalidMetadata(
                "fileMatch inclusion requires a file match pattern".to_string(),
            )),
            (Inclusion::FileMatch, Some(p)) if p.contains(['\n', '\r']) => Err(
                SuitError::InvalidMetadata("file match pattern must be a single line".to_string()),
            ),
            (Inclusion::FileMatch, Some(_)) | (_, None | Some("")) => Ok(()),
            (_, Some(_)) => Err(SuitError::InvalidMetadata(format!(
                "a file match pattern only applies to fileMatch inclusion, not {}",
                self.inclusion
            ))),
        }
    }
}

/// Double-quoted YAML scalar.
fn yaml_quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// `my-feature` → `My Feature`
pub fn title_from_identifier(identifier: &str) -> String {
    identifier
        .split('-')
        .filter(|s| !s.is_empty())
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

/// Starter content for a new custom steering document. Deterministic for a
/// given name and metadata. Callers run [`TemplateMetadata::check`] first.
pub fn generate(name: &ValidName, meta: &TemplateMetadata) -> String {
    let title = meta
        .title
        .as_deref()
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| title_from_identifier(name.as_str()));

    let purpose = meta
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!("Describe what `{name}` guides and when the assistant should apply it.")
        });

    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!("inclusion: {}\n", meta.inclusion));
    if meta.inclusion == Inclusion::FileMatch {
        if let Some(pattern) = meta.file_match_pattern.as_deref().map(str::trim) {
            out.push_str(&format!("fileMatchPattern: {}\n", yaml_quoted(pattern)));
        }
    }
    out.push_str("---\n\n");
    out.push_str(&format!("# {title}\n\n"));

    for section in STANDARD_SECTIONS {
        out.push_str(&format!("## {section}\n\n"));
        let body = match *section {
            "Purpose" => purpose.clone(),
            "Key Concepts" => {
                "- List the core ideas, terms, and constraints the assistant must know.".to_string()
            }
            "Best Practices" => {
                "- List the practices to follow, most important first.".to_string()
            }
            "Anti-Patterns" => "- List what to avoid and why it hurts.".to_string(),
            _ => "Summarize the guidance in two or three sentences.".to_string(),
        };
        out.push_str(&body);
        out.push_str("\n\n");
    }

    // Single trailing newline.
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}
