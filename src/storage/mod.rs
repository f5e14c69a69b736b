// src/storage/mod.rs
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const THEME_KEY: &str = "notes-theme";
pub const CUSTOM_LABELS_KEY: &str = "notes-custom-labels";
pub const KEYBINDS_KEY: &str = "notes-keybinds";

/// String-keyed persistent store for small JSON blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whole store lives in one JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened storage");
        Ok(FileStore { path, entries })
    }

    pub fn default_path() -> PathBuf {
        crate::config::AppConfig::app_dir(dirs::data_dir()).join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        store.set(CUSTOM_LABELS_KEY, r#"["Answer"]"#).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(
            reopened.get(CUSTOM_LABELS_KEY).unwrap().as_deref(),
            Some(r#"["Answer"]"#)
        );
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(FileStore::open(&path).is_err());
    }
}
