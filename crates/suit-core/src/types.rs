use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// Where a steering document comes from. Resolved from the bundled registry
/// at lookup time, never stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Bundled,
    Custom,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Bundled => "bundled",
            Origin::Custom => "custom",
        }
    }

    pub fn is_mutable(self) -> bool {
        self == Origin::Custom
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Inclusion
// ---------------------------------------------------------------------------

/// Kiro front-matter `inclusion:` mode for a steering document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Inclusion {
    #[default]
    Always,
    FileMatch,
    Manual,
}

impl Inclusion {
    pub fn as_str(self) -> &'static str {
        match self {
            Inclusion::Always => "always",
            Inclusion::FileMatch => "fileMatch",
            Inclusion::Manual => "manual",
        }
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Inclusion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Inclusion::Always),
            "fileMatch" | "file-match" | "file_match" => Ok(Inclusion::FileMatch),
            "manual" => Ok(Inclusion::Manual),
            other => Err(format!(
                "unknown inclusion mode '{other}'; valid: always, file-match, manual"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// SteeringDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SteeringDocument {
    pub identifier: String,
    pub origin: Origin,
    pub content: String,
    pub path: PathBuf,
}

/// One row of the steering status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub identifier: String,
    pub origin: Origin,
    /// Whether the file exists on disk. Bundled documents resolve from the
    /// embedded copy until `init` installs them.
    pub installed: bool,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SteeringStatus {
    pub initialized: bool,
    pub steering_dir: PathBuf,
    pub documents: Vec<DocumentSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_error_above_warning() {
        assert!(Severity::Error > Severity::Warning);
    }

    #[test]
    fn inclusion_parses_cli_spellings() {
        assert_eq!("file-match".parse::<Inclusion>().unwrap(), Inclusion::FileMatch);
        assert_eq!("fileMatch".parse::<Inclusion>().unwrap(), Inclusion::FileMatch);
        assert_eq!("always".parse::<Inclusion>().unwrap(), Inclusion::Always);
        assert!("sometimes".parse::<Inclusion>().is_err());
    }

    #[test]
    fn only_custom_is_mutable() {
        assert!(Origin::Custom.is_mutable());
        assert!(!Origin::Bundled.is_mutable());
    }
}
