//! Minimal markdown outline parser for steering documents.
//!
//! Only what structural validation needs: ATX headings (outside fenced code
//! blocks and YAML front matter) and whether each section has a body.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub text: String,
    /// 1-based line number in the original content.
    pub line: usize,
    /// Non-blank, non-heading lines up to the next heading of the same or
    /// higher level. Subsection content counts toward the parent.
    pub body_lines: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub headings: Vec<Heading>,
}

impl Outline {
    pub fn titles(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|h| h.level == 1)
    }

    /// First level-2 heading whose text matches `name` case-insensitively.
    pub fn section(&self, name: &str) -> Option<&Heading> {
        let wanted = name.trim();
        self.headings
            .iter()
            .find(|h| h.level == 2 && h.text.eq_ignore_ascii_case(wanted))
    }
}

enum LineKind {
    Blank,
    Text,
    Heading,
}

pub fn parse(content: &str) -> Outline {
    let lines: Vec<&str> = content.lines().collect();
    let start = front_matter_end(&lines).unwrap_or(0);

    let mut kinds: Vec<LineKind> = Vec::with_capacity(lines.len());
    let mut headings = Vec::new();
    let mut fences = FenceTracker::default();

    for (idx, raw) in lines.iter().enumerate() {
        if idx < start {
            kinds.push(LineKind::Blank);
            continue;
        }
        match fences.feed(raw) {
            FenceLine::Delimiter => {
                kinds.push(LineKind::Text);
                continue;
            }
            FenceLine::Inside => {}
            FenceLine::Outside => {
                if let Some((level, text)) = heading_line(raw) {
                    headings.push(Heading {
                        level,
                        text,
                        line: idx + 1,
                        body_lines: 0,
                    });
                    kinds.push(LineKind::Heading);
                    continue;
                }
            }
        }

        if raw.trim().is_empty() {
            kinds.push(LineKind::Blank);
        } else {
            kinds.push(LineKind::Text);
        }
    }

    for i in 0..headings.len() {
        let level = headings[i].level;
        let from = headings[i].line; // index of the line after the heading
        let to = headings[i + 1..]
            .iter()
            .find(|h| h.level <= level)
            .map(|h| h.line - 1)
            .unwrap_or(lines.len());
        headings[i].body_lines = kinds[from..to]
            .iter()
            .filter(|k| matches!(k, LineKind::Text))
            .count();
    }

    Outline { headings }
}

/// Number of lines the front matter occupies, i.e. the index just past the
/// closing `---`.
fn front_matter_end(lines: &[&str]) -> Option<usize> {
    if lines.first().map(|l| l.trim_end()) != Some("---") {
        return None;
    }
    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, l)| l.trim_end() == "---")
        .map(|(i, _)| i + 1)
}

// ---------------------------------------------------------------------------
// Fenced code blocks
// ---------------------------------------------------------------------------

/// Where a line sits relative to fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FenceLine {
    /// Opens or closes a fence.
    Delimiter,
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    ch: char,
    len: usize,
}

/// Line-by-line fence state. A fence closes only on a run of the same
/// character, at least as long as the opener, with nothing after it.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn feed(&mut self, raw: &str) -> FenceLine {
        let trimmed = raw.trim_start();
        let indented = raw.len() - trimmed.len() > 3;

        match self.open {
            Some(open) => {
                if !indented && closes(open, trimmed) {
                    self.open = None;
                    FenceLine::Delimiter
                } else {
                    FenceLine::Inside
                }
            }
            None => match (!indented).then(|| opener(trimmed)).flatten() {
                Some(fence) => {
                    self.open = Some(fence);
                    FenceLine::Delimiter
                }
                None => FenceLine::Outside,
            },
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let ch = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}

fn opener(trimmed: &str) -> Option<Fence> {
    let (ch, len) = fence_run(trimmed)?;
    // Backtick info strings may not contain backticks.
    if ch == '`' && trimmed[len..].contains('`') {
        return None;
    }
    Some(Fence { ch, len })
}

fn closes(open: Fence, trimmed: &str) -> bool {
    match fence_run(trimmed) {
        Some((ch, len)) => ch == open.ch && len >= open.len && trimmed[len..].trim().is_empty(),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

/// ATX heading on a line outside any fence, allowing up to three spaces of
/// indentation.
pub(crate) fn heading_line(raw: &str) -> Option<(usize, String)> {
    let trimmed = raw.trim_start();
    if raw.len() - trimmed.len() > 3 {
        return None;
    }
    atx_heading(trimmed)
}

fn atx_heading(trimmed: &str) -> Option<(usize, String)> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let text = rest.trim();
    // Optional closing sequence: "## Title ##"
    let text = match text.trim_end_matches('#') {
        stripped if stripped.len() != text.len() && (stripped.is_empty() || stripped.ends_with(' ')) => {
            stripped.trim_end()
        }
        _ => text,
    };
    Some((level, text.to_string()))
}
