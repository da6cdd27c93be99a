//! Key-value storage backed by a single JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::AlmanacResult;
use crate::storage::KeyValueStore;

/// A JSON object of string values on disk, rewritten in full on every `set`.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Storage file is not a JSON object of strings"
                );
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        FileStore { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> AlmanacResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        let temp = self.path.with_extension("json.tmp");

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AlmanacResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/storage.json");

        let mut store = FileStore::open(&path);
        store.set("currentDate", "2024-06-01T00:00:00Z").unwrap();
        store.set("appointments", "[]").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("currentDate").as_deref(), Some("2024-06-01T00:00:00Z"));
        assert_eq!(reopened.get("appointments").as_deref(), Some("[]"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "this is not json").unwrap();

        let store = FileStore::open(&path);
        assert!(store.get("appointments").is_none());
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json"));
        assert!(store.get("currentDate").is_none());
    }
}
