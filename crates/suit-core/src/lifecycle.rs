use crate::bundled;
use crate::config::Config;
use crate::error::{Result, SuitError};
use crate::name::NameValidator;
use crate::template::{self, TemplateMetadata};
use crate::types::{DocumentSummary, Origin, SteeringDocument, SteeringStatus};
use crate::validate::{self, ValidationPolicy, ValidationResult};
use crate::{io, paths};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Confirmed
// ---------------------------------------------------------------------------

/// Proof that the caller obtained explicit confirmation before a delete.
/// The core never prompts; whoever constructs this value took responsibility.
#[derive(Debug, Clone, Copy)]
pub struct Confirmed(());

impl Confirmed {
    pub fn by_caller() -> Self {
        Confirmed(())
    }
}

// ---------------------------------------------------------------------------
// InitReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// Paths relative to the workspace root.
    pub created: Vec<String>,
    pub existing: Vec<String>,
}

impl InitReport {
    fn record(&mut self, rel: &str, created: bool) {
        if created {
            self.created.push(rel.to_string());
        } else {
            self.existing.push(rel.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// SteeringManager
// ---------------------------------------------------------------------------

/// Create, rename, delete, and validate steering documents under
/// `<root>/.kiro/steering`. Only `Custom` documents may be mutated.
#[derive(Debug, Clone)]
pub struct SteeringManager {
    root: PathBuf,
    names: NameValidator,
    policy: ValidationPolicy,
}

impl SteeringManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, &Config::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            names: config.name_validator(),
            policy: config.validation.clone(),
        }
    }

    /// Build a manager from `<root>/.kiro/suit.yaml` (or defaults).
    pub fn load(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        Ok(Self::with_config(root, &config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn steering_dir(&self) -> PathBuf {
        paths::steering_dir(&self.root)
    }

    pub fn is_initialized(&self) -> bool {
        self.steering_dir().is_dir()
    }

    // -----------------------------------------------------------------------
    // Init
    // -----------------------------------------------------------------------

    /// Create the `.kiro` layout, default config, and any missing bundled
    /// documents. Never overwrites.
    pub fn init(&self) -> Result<InitReport> {
        let mut report = InitReport::default();

        for dir in [paths::STEERING_DIR, paths::FRAMEWORKS_DIR] {
            let p = self.root.join(dir);
            let existed = p.is_dir();
            io::ensure_dir(&p)?;
            report.record(dir, !existed);
        }

        let config_path = paths::config_path(&self.root);
        if config_path.exists() {
            report.record(paths::CONFIG_FILE, false);
        } else {
            Config::default().save(&self.root)?;
            report.record(paths::CONFIG_FILE, true);
        }

        for id in bundled::identifiers() {
            let Some(content) = bundled::content(id) else {
                continue;
            };
            let path = paths::document_path(&self.root, id);
            let written = io::write_if_missing(&path, content.as_bytes())?;
            report.record(&format!("{}/{id}.{}", paths::STEERING_DIR, paths::DOCUMENT_EXT), written);
        }

        tracing::info!(
            root = %self.root.display(),
            created = report.created.len(),
            existing = report.existing.len(),
            "initialized steering directory"
        );
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Resolve an identifier to a document. Bundled identifiers always
    /// resolve: to the installed file if present, else to the embedded copy.
    fn resolve(&self, identifier: &str) -> Result<Option<SteeringDocument>> {
        if !is_plain_file_stem(identifier) {
            return Ok(None);
        }
        let path = paths::document_path(&self.root, identifier);
        let origin = if bundled::is_bundled(identifier) {
            Origin::Bundled
        } else {
            Origin::Custom
        };

        // Anything but a regular file (e.g. a directory named `x.md`) is
        // treated as absent, matching `list`.
        let content = match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Some(std::fs::read_to_string(&path)?),
            Ok(_) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        let content = match (content, origin) {
            (Some(c), _) => c,
            (None, Origin::Bundled) => match bundled::content(identifier) {
                Some(c) => c,
                None => return Ok(None),
            },
            (None, Origin::Custom) => return Ok(None),
        };

        tracing::debug!(identifier, %origin, "resolved steering document");
        Ok(Some(SteeringDocument {
            identifier: identifier.to_string(),
            origin,
            content,
            path,
        }))
    }

    pub fn get(&self, identifier: &str) -> Result<SteeringDocument> {
        self.resolve(identifier)?
            .ok_or_else(|| SuitError::NotFound(identifier.to_string()))
    }

    fn get_custom(&self, identifier: &str) -> Result<SteeringDocument> {
        let doc = self.get(identifier)?;
        if !doc.origin.is_mutable() {
            return Err(SuitError::NotCustom(identifier.to_string()));
        }
        Ok(doc)
    }

    // -----------------------------------------------------------------------
    // Create / Rename / Delete
    // -----------------------------------------------------------------------

    pub fn create(&self, identifier: &str, meta: &TemplateMetadata) -> Result<SteeringDocument> {
        let name = self.names.validate(identifier)?;
        meta.check()?;
        if self.resolve(name.as_str())?.is_some() {
            return Err(SuitError::AlreadyExists(name.into_inner()));
        }

        let content = template::generate(&name, meta);
        let path = paths::document_path(&self.root, name.as_str());
        match io::atomic_create(&path, content.as_bytes()) {
            Ok(()) => {}
            Err(SuitError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(SuitError::AlreadyExists(name.into_inner()));
            }
            Err(e) => return Err(e),
        }

        tracing::info!(identifier = name.as_str(), path = %path.display(), "created steering document");
        Ok(SteeringDocument {
            identifier: name.into_inner(),
            origin: Origin::Custom,
            content,
            path,
        })
    }

    pub fn rename(&self, old: &str, new: &str) -> Result<SteeringDocument> {
        let doc = self.get_custom(old)?;
        let name = self.names.validate(new)?;
        if self.resolve(name.as_str())?.is_some() {
            return Err(SuitError::AlreadyExists(name.into_inner()));
        }

        let new_path = paths::document_path(&self.root, name.as_str());
        std::fs::rename(&doc.path, &new_path)?;

        tracing::info!(from = old, to = name.as_str(), "renamed steering document");
        Ok(SteeringDocument {
            identifier: name.into_inner(),
            origin: Origin::Custom,
            content: doc.content,
            path: new_path,
        })
    }

    /// Remove a custom document. Returns what was deleted.
    pub fn delete(&self, identifier: &str, _confirmed: Confirmed) -> Result<SteeringDocument> {
        let doc = self.get_custom(identifier)?;
        std::fs::remove_file(&doc.path)?;
        tracing::info!(identifier, path = %doc.path.display(), "deleted steering document");
        Ok(doc)
    }

    // -----------------------------------------------------------------------
    // Validate
    // -----------------------------------------------------------------------

    pub fn validate(&self, identifier: &str) -> Result<ValidationResult> {
        let doc = self.get(identifier)?;
        let result = validate::validate_content(&doc.content, &self.policy);
        tracing::debug!(
            identifier,
            diagnostics = result.diagnostics.len(),
            valid = result.is_valid(),
            "validated steering document"
        );
        Ok(result)
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    /// Bundled documents in registry order, then custom documents on disk
    /// sorted by identifier.
    pub fn list(&self) -> Result<Vec<DocumentSummary>> {
        let mut out: Vec<DocumentSummary> = bundled::identifiers()
            .iter()
            .map(|id| {
                let path = paths::document_path(&self.root, id);
                DocumentSummary {
                    identifier: id.to_string(),
                    origin: Origin::Bundled,
                    installed: path.is_file(),
                    path,
                }
            })
            .collect();

        let dir = self.steering_dir();
        if !dir.is_dir() {
            return Ok(out);
        }

        let mut custom = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(identifier) = paths::identifier_of(&path) else {
                continue;
            };
            if bundled::is_bundled(&identifier) {
                continue;
            }
            custom.push(DocumentSummary {
                identifier,
                origin: Origin::Custom,
                installed: true,
                path,
            });
        }
        custom.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        out.extend(custom);
        Ok(out)
    }

    pub fn status(&self) -> Result<SteeringStatus> {
        Ok(SteeringStatus {
            initialized: self.is_initialized(),
            steering_dir: self.steering_dir(),
            documents: self.list()?,
        })
    }
}

/// A lookup key that maps to a single file directly inside the steering
/// directory.
fn is_plain_file_stem(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier != "."
        && identifier != ".."
        && !identifier.contains(['/', '\\', '\0'])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
