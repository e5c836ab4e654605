use crate::error::Result;
use crate::name::{NameValidator, DEFAULT_MAX_NAME_LENGTH};
use crate::paths;
use crate::types::Severity;
use crate::validate::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: Severity,
    pub message: String,
}

// ---------------------------------------------------------------------------
// NamesConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamesConfig {
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_NAME_LENGTH
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub names: NamesConfig,
    #[serde(default)]
    pub validation: ValidationPolicy,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            names: NamesConfig::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl Config {
    /// Load `.kiro/suit.yaml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn name_validator(&self) -> NameValidator {
        NameValidator::new(self.names.max_length)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Name length bound
        if self.names.max_length == 0 {
            warnings.push(ConfigWarning {
                level: Severity::Error,
                message: "names.max_length is 0; no document name can be valid".to_string(),
            });
        } else if self.names.max_length > 255 {
            warnings.push(ConfigWarning {
                level: Severity::Warning,
                message: format!(
                    "names.max_length={} exceeds common filename limits (255)",
                    self.names.max_length
                ),
            });
        }

        // 2. Required sections: blank names and duplicates
        let mut seen = HashSet::new();
        for section in &self.validation.required_sections {
            let name = section.name.trim();
            if name.is_empty() {
                warnings.push(ConfigWarning {
                    level: Severity::Error,
                    message: "validation.required_sections contains a blank name".to_string(),
                });
                continue;
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                warnings.push(ConfigWarning {
                    level: Severity::Warning,
                    message: format!(
                        "required section '{name}' is listed more than once"
                    ),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::RequiredSection;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.names.max_length, 100);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "version: 1\nnames:\n  max_length: 40\nvalidation:\n  empty_section: error\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.names.max_length, 40);
        assert_eq!(cfg.validation.empty_section, Severity::Error);
        assert_eq!(cfg.validation.heading_skip, Severity::Warning);
        assert_eq!(cfg.name_validator().max_length(), 40);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.validation.required_sections.truncate(1);
        cfg.save(dir.path()).unwrap();
        assert!(dir.path().join(".kiro/suit.yaml").exists());
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".kiro")).unwrap();
        std::fs::write(dir.path().join(".kiro/suit.yaml"), "names: [unclosed").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(crate::SuitError::Yaml(_))
        ));
    }

    #[test]
    fn default_config_has_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_settings() {
        let mut cfg = Config::default();
        cfg.names.max_length = 0;
        cfg.validation.required_sections.push(RequiredSection {
            name: "purpose".to_string(),
            severity: Severity::Warning,
        });
        cfg.validation.required_sections.push(RequiredSection {
            name: "  ".to_string(),
            severity: Severity::Warning,
        });
        let warnings = cfg.validate();
        let levels: Vec<Severity> = warnings.iter().map(|w| w.level).collect();
        assert_eq!(
            levels,
            vec![Severity::Error, Severity::Warning, Severity::Error]
        );
        assert!(warnings[1].message.contains("purpose"));
    }

    #[test]
    fn large_max_length_warns() {
        let mut cfg = Config::default();
        cfg.names.max_length = 1000;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, Severity::Warning);
    }
}
