use crate::error::{Result, SuitError};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key recorded once the first-run welcome message has been shown.
pub const WELCOME_SHOWN: &str = "welcome_shown";

// ---------------------------------------------------------------------------
// StateStore
// ---------------------------------------------------------------------------

/// Global key-value state owned by the host. Components that need it take a
/// `&mut dyn StateStore`; they never open one themselves.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Returns the previous value, if any.
    fn remove(&mut self, key: &str) -> Result<Option<String>>;
}

/// Returns `true` the first time it is called against a store, then records
/// [`WELCOME_SHOWN`] so later calls return `false`.
pub fn take_welcome(store: &mut dyn StateStore) -> Result<bool> {
    if store.get(WELCOME_SHOWN).is_some() {
        return Ok(false);
    }
    store.set(WELCOME_SHOWN, "true")?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// MemoryStateStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    values: BTreeMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.values.remove(key))
    }
}

// ---------------------------------------------------------------------------
// FileStateStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    values: BTreeMap<String, String>,
    last_updated: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

/// YAML-backed store. A missing file is an empty store; every mutation is
/// written through atomically.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStateStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let file: StateFile = serde_yaml::from_str(&data)?;
            file.values
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// `~/.suit/state.yaml`
    pub fn default_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or(SuitError::HomeNotFound)?;
        Ok(home.join(paths::USER_STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let file = StateFile {
            version: default_version(),
            values: self.values.clone(),
            last_updated: Utc::now(),
        };
        let data = serde_yaml::to_string(&file)?;
        crate::io::atomic_write(&self.path, data.as_bytes())
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>> {
        let previous = self.values.remove(key);
        if previous.is_some() {
            self.flush()?;
        }
        Ok(previous)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
