use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{CredentialStore, CREDENTIAL_KEY};

/// Credential persisted in a small JSON key-value file.
///
/// Keys other than [`CREDENTIAL_KEY`] are left untouched on save.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> String {
        match self.read_entries() {
            Ok(entries) => entries
                .get(CREDENTIAL_KEY)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                log::warn!("Ignoring unreadable credential store: {:#}", e);
                String::new()
            }
        }
    }

    fn save(&self, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking the save.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(CREDENTIAL_KEY.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(&Value::Object(entries))?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        log::info!("Saved credential ({} chars) to {}", value.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.load(), "");
    }

    #[test]
    fn test_save_survives_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        FileCredentialStore::new(&path).save("sk-123").unwrap();

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.load(), "sk-123");
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"theme": "dark", "cerebras_api_key": "old"}"#).unwrap();

        let store = FileCredentialStore::new(&path);
        store.save("new").unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[CREDENTIAL_KEY], "new");
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.load(), "");

        store.save("sk-1").unwrap();
        assert_eq!(store.load(), "sk-1");
    }
}
