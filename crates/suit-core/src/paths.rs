use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const STEERING_DIR: &str = ".kiro/steering";
pub const FRAMEWORKS_DIR: &str = ".kiro/frameworks";

pub const CONFIG_FILE: &str = ".kiro/suit.yaml";

/// Default location of the global state file, relative to the user's home.
pub const USER_STATE_FILE: &str = ".suit/state.yaml";

pub const DOCUMENT_EXT: &str = "md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn steering_dir(root: &Path) -> PathBuf {
    root.join(STEERING_DIR)
}

pub fn frameworks_dir(root: &Path) -> PathBuf {
    root.join(FRAMEWORKS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `<root>/.kiro/steering/<identifier>.md`
pub fn document_path(root: &Path, identifier: &str) -> PathBuf {
    steering_dir(root).join(format!("{identifier}.{DOCUMENT_EXT}"))
}

pub fn framework_path(root: &Path, id: &str) -> PathBuf {
    frameworks_dir(root).join(format!("{id}.{DOCUMENT_EXT}"))
}

/// Identifier for a steering file, or `None` if it is not a markdown file.
pub fn identifier_of(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXT) {
        return None;
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
