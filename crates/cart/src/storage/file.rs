//! File-backed key-value store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, validate_key};
use crate::error::StorageError;

/// Stores each key as `<dir>/<key>`.
///
/// Writes go to a temporary sibling and are renamed into place, so readers
/// see either the previous document or the new one, never a partial write.
/// Two processes writing the same key still race; the last rename wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Leading dot keeps the temp file out of the valid key namespace.
        let temp_path = self.dir.join(format!(".{key}.tmp"));

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("carts");

        let store = FileStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_get_missing_key() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();

        assert_eq!(store.get("cart-storage").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();

        store.set("cart-storage", r#"{"version":1}"#).unwrap();
        assert_eq!(
            store.get("cart-storage").unwrap().as_deref(),
            Some(r#"{"version":1}"#)
        );
        assert!(tmp.path().join("cart-storage").is_file());
    }

    #[test]
    fn test_set_overwrites_and_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();

        store.set("cart-storage", "a much longer first value").unwrap();
        store.set("cart-storage", "short").unwrap();

        assert_eq!(store.get("cart-storage").unwrap().as_deref(), Some("short"));
        assert!(!tmp.path().join(".cart-storage.tmp").exists());
    }

    #[test]
    fn test_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();

        store.set("cart-storage", "[]").unwrap();
        store.remove("cart-storage").unwrap();
        assert_eq!(store.get("cart-storage").unwrap(), None);

        // Idempotent
        assert!(store.remove("cart-storage").is_ok());
    }

    #[test]
    fn test_rejects_traversal_key() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(tmp.path().join("slots")).unwrap();

        let err = store.set("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_, _)));
        assert!(!tmp.path().join("escape").exists());
    }
}
