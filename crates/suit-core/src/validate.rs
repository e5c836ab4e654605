use crate::markdown::{self, Outline};
use crate::template::STANDARD_SECTIONS;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "line", rename_all = "snake_case")]
pub enum Location {
    Document,
    Line(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Document => f.write_str("document"),
            Location::Line(n) => write!(f, "line {n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    MissingTitle,
    MultipleTitles,
    HeadingSkip,
    MissingSection,
    EmptySection,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::MissingTitle => "missing-title",
            Rule::MultipleTitles => "multiple-titles",
            Rule::HeadingSkip => "heading-skip",
            Rule::MissingSection => "missing-section",
            Rule::EmptySection => "empty-section",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub rule: Rule,
    pub message: String,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// True iff no diagnostic has `Error` severity.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    fn push(&mut self, severity: Severity, rule: Rule, location: Location, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            rule,
            message,
            location,
        });
    }
}

// ---------------------------------------------------------------------------
// ValidationPolicy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSection {
    pub name: String,
    pub severity: Severity,
}

/// Severity assigned to each structural rule. Loaded from the `validation:`
/// block of `.kiro/suit.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    #[serde(default = "default_error")]
    pub missing_title: Severity,
    #[serde(default = "default_warning")]
    pub multiple_titles: Severity,
    #[serde(default = "default_warning")]
    pub heading_skip: Severity,
    #[serde(default = "default_warning")]
    pub empty_section: Severity,
    #[serde(default = "default_required_sections")]
    pub required_sections: Vec<RequiredSection>,
}

fn default_error() -> Severity {
    Severity::Error
}

fn default_warning() -> Severity {
    Severity::Warning
}

fn default_required_sections() -> Vec<RequiredSection> {
    STANDARD_SECTIONS
        .iter()
        .map(|name| RequiredSection {
            name: name.to_string(),
            severity: if *name == "Purpose" {
                Severity::Error
            } else {
                Severity::Warning
            },
        })
        .collect()
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            missing_title: default_error(),
            multiple_titles: default_warning(),
            heading_skip: default_warning(),
            empty_section: default_warning(),
            required_sections: default_required_sections(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_content(content: &str, policy: &ValidationPolicy) -> ValidationResult {
    let outline = markdown::parse(content);
    validate_outline(&outline, policy)
}

pub fn validate_outline(outline: &Outline, policy: &ValidationPolicy) -> ValidationResult {
    let mut result = ValidationResult::default();

    // 1. Title
    let titles: Vec<_> = outline.titles().collect();
    if titles.is_empty() {
        result.push(
            policy.missing_title,
            Rule::MissingTitle,
            Location::Document,
            "document has no top-level '# ' title".to_string(),
        );
    }
    for extra in titles.iter().skip(1) {
        result.push(
            policy.multiple_titles,
            Rule::MultipleTitles,
            Location::Line(extra.line),
            format!(
                "additional top-level title '{}' (first is on line {})",
                extra.text, titles[0].line
            ),
        );
    }

    // 2. Heading hierarchy
    let mut prev_level = 0;
    for h in &outline.headings {
        if h.level > prev_level + 1 {
            result.push(
                policy.heading_skip,
                Rule::HeadingSkip,
                Location::Line(h.line),
                format!(
                    "heading '{}' jumps from level {} to level {}",
                    h.text, prev_level, h.level
                ),
            );
        }
        prev_level = h.level;
    }

    // 3. Required sections
    for required in &policy.required_sections {
        match outline.section(&required.name) {
            None => result.push(
                required.severity,
                Rule::MissingSection,
                Location::Document,
                format!("missing required section '## {}'", required.name.trim()),
            ),
            Some(h) if h.body_lines == 0 => result.push(
                policy.empty_section,
                Rule::EmptySection,
                Location::Line(h.line),
                format!("section '## {}' is empty", h.text),
            ),
            Some(_) => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::validate_name;
    use crate::template::{generate, TemplateMetadata};

    fn full_doc_without(section: &str) -> String {
        let mut doc = String::from("# Doc\n\n");
        for s in STANDARD_SECTIONS.iter().filter(|s| **s != section) {
            doc.push_str(&format!("## {s}\n\nSome guidance.\n\n"));
        }
        doc
    }

    #[test]
    fn generated_template_is_clean() {
        let name = validate_name("my-feature").unwrap();
        let doc = generate(&name, &TemplateMetadata::default());
        let result = validate_content(&doc, &ValidationPolicy::default());
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert!(result.is_valid());
    }

    #[test]
    fn missing_summary_is_single_warning() {
        let result = validate_content(&full_doc_without("Summary"), &ValidationPolicy::default());
        assert_eq!(result.diagnostics.len(), 1);
        let d = &result.diagnostics[0];
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.rule, Rule::MissingSection);
        assert!(d.message.contains("Summary"));
        assert!(result.is_valid());
    }

    #[test]
    fn missing_purpose_is_error() {
        let result = validate_content(&full_doc_without("Purpose"), &ValidationPolicy::default());
        assert_eq!(result.errors().count(), 1);
        assert!(!result.is_valid());
    }

    #[test]
    fn policy_controls_severity() {
        let mut policy = ValidationPolicy::default();
        for r in &mut policy.required_sections {
            if r.name == "Summary" {
                r.severity = Severity::Error;
            }
        }
        let result = validate_content(&full_doc_without("Summary"), &policy);
        assert!(!result.is_valid());
    }

    #[test]
    fn empty_section_and_title_rules() {
        let doc = "## Purpose\n\n## Key Concepts\n- a\n";
        let policy = ValidationPolicy {
            required_sections: vec![
                RequiredSection {
                    name: "Purpose".to_string(),
                    severity: Severity::Error,
                },
                RequiredSection {
                    name: "key concepts".to_string(),
                    severity: Severity::Error,
                },
            ],
            ..ValidationPolicy::default()
        };
        let result = validate_content(doc, &policy);
        let rules: Vec<Rule> = result.diagnostics.iter().map(|d| d.rule).collect();
        // No H1, then the level-2 heading after level 0 is a skip, then empty Purpose.
        assert_eq!(
            rules,
            vec![
                Rule::MissingTitle,
                Rule::HeadingSkip,
                Rule::EmptySection
            ]
        );
        assert_eq!(result.diagnostics[2].location, Location::Line(1));
        assert!(!result.is_valid());
    }

    #[test]
    fn heading_skip_and_duplicate_title() {
        let doc = "# One\n\n#### Deep\n\n# Two\n";
        let policy = ValidationPolicy {
            required_sections: Vec::new(),
            ..ValidationPolicy::default()
        };
        let result = validate_content(doc, &policy);
        let got: Vec<(Rule, Location)> = result
            .diagnostics
            .iter()
            .map(|d| (d.rule, d.location))
            .collect();
        assert_eq!(
            got,
            vec![
                (Rule::MultipleTitles, Location::Line(5)),
                (Rule::HeadingSkip, Location::Line(3)),
            ]
        );
        assert!(result.is_valid());
    }

    #[test]
    fn policy_yaml_defaults_fill_in() {
        let policy: ValidationPolicy = serde_yaml::from_str("heading_skip: error\n").unwrap();
        assert_eq!(policy.heading_skip, Severity::Error);
        assert_eq!(policy.missing_title, Severity::Error);
        assert_eq!(policy.required_sections.len(), STANDARD_SECTIONS.len());
    }
}
