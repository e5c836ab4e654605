use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting state files.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = staged(path, data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Like [`atomic_write`], but fails with `ErrorKind::AlreadyExists` instead of
/// replacing an existing file. On failure nothing is left at `path`.
pub fn atomic_create(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = staged(path, data)?;
    tmp.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}

fn staged(path: &Path, data: &[u8]) -> Result<NamedTempFile> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    Ok(tmp)
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tech.md");
        atomic_write(&path, b"# Tech").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Tech");
    }

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".kiro/steering/tech.md");
        atomic_write(&path, b"data").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn atomic_create_refuses_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, b"original").unwrap();

        let err = atomic_create(&path, b"new").unwrap_err();
        match err {
            crate::SuitError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::AlreadyExists),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
        // Only the original file remains; the staged tempfile was cleaned up.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("existing.md");
        std::fs::write(&path, b"original").unwrap();
        let written = write_if_missing(&path, b"new").unwrap();
        assert!(!written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }
}
