use crate::error::{Result, SuitError};
use crate::markdown;
use crate::{io, paths};
use rust_embed::Embed;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/frameworks/"]
struct FrameworkAssets;

// ---------------------------------------------------------------------------
// Framework
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Framework {
    pub id: String,
    pub title: String,
    /// First paragraph of the Purpose section, joined onto one line.
    pub summary: String,
    #[serde(skip_serializing)]
    pub content: String,
}

impl Framework {
    fn from_asset(id: &str, content: String) -> Self {
        let outline = markdown::parse(&content);
        let title = outline
            .titles()
            .next()
            .map(|h| h.text.clone())
            .unwrap_or_else(|| id.to_string());
        let summary = outline
            .section("Purpose")
            .map(|h| first_paragraph(&content, h.line))
            .unwrap_or_default();
        Self {
            id: id.to_string(),
            title,
            summary,
            content,
        }
    }
}

/// Lines after `heading_line` (1-based) up to the first blank line that
/// follows some text, or the next heading.
fn first_paragraph(content: &str, heading_line: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for line in content.lines().skip(heading_line) {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            break;
        }
        if trimmed.is_empty() {
            if parts.is_empty() {
                continue;
            }
            break;
        }
        parts.push(trimmed);
    }
    parts.join(" ")
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// All bundled frameworks, sorted by id.
pub fn list() -> Vec<Framework> {
    let mut ids: Vec<String> = <FrameworkAssets as Embed>::iter()
        .filter_map(|name| name.strip_suffix(".md").map(str::to_string))
        .collect();
    ids.sort();
    ids.iter().filter_map(|id| get(id).ok()).collect()
}

pub fn get(id: &str) -> Result<Framework> {
    let file = <FrameworkAssets as Embed>::get(&format!("{id}.md"))
        .ok_or_else(|| SuitError::FrameworkNotFound(id.to_string()))?;
    let content = String::from_utf8_lossy(&file.data).into_owned();
    Ok(Framework::from_asset(id, content))
}

/// Copy a bundled framework into `.kiro/frameworks/`. Existing files are left
/// alone. Returns the target path and whether it was written.
pub fn install(root: &Path, id: &str) -> Result<(PathBuf, bool)> {
    let framework = get(id)?;
    let path = paths::framework_path(root, &framework.id);
    let written = io::write_if_missing(&path, framework.content.as_bytes())?;
    if written {
        tracing::info!(framework = %framework.id, path = %path.display(), "installed framework");
    } else {
        tracing::debug!(framework = %framework.id, "framework already installed");
    }
    Ok((path, written))
}
