//! Durable Credential Storage using a JSON file

use bridge_traits::{
    error::{BridgeError, Result},
    storage::KeyValueStore,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// File-backed key-value store
///
/// The desktop analog of `localStorage`: a small JSON object persisted under
/// the user config directory, so credentials survive restarts. The whole map
/// is loaded at construction and rewritten on every mutation; with three
/// short string entries that is cheaper than anything clever.
///
/// Tokens stored here sit on disk in plain text. Hosts that need at-rest
/// protection should prefer [`KeyringKeyValueStore`](crate::KeyringKeyValueStore)
/// (feature `secure-store`).
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileKeyValueStore {
    /// Open (or create) a store at the given path
    ///
    /// The parent directory is created if needed. An unreadable or corrupt
    /// file is treated as empty rather than refusing to start; the next write
    /// replaces it.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(BridgeError::Io)?;
        }

        let entries = Self::load_entries(&path);

        debug!(path = %path.display(), "Opened credential file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Open the store at its default location
    ///
    /// `{config_dir}/floorplan-viewer/credentials.json`, where `config_dir`
    /// is the platform convention (`~/.config` on Linux,
    /// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows).
    pub fn with_default_path() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            BridgeError::NotAvailable("No user config directory on this platform".to_string())
        })?;

        Self::new(config_dir.join("floorplan-viewer").join("credentials.json"))
    }

    fn load_entries(path: &Path) -> HashMap<String, String> {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Credential file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| BridgeError::OperationFailed(format!("Failed to serialize: {}", e)))?;

        fs::write(&self.path, contents).map_err(BridgeError::Io)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(dir.path().join("credentials.json")).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("access_token", "at1").unwrap();
        assert_eq!(store.get("access_token").unwrap(), Some("at1".to_string()));

        store.remove("access_token").unwrap();
        assert_eq!(store.get("access_token").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");

        {
            let store = FileKeyValueStore::new(&path).unwrap();
            store.set("refresh_token", "rt1").unwrap();
        }

        let reopened = FileKeyValueStore::new(&path).unwrap();
        assert_eq!(
            reopened.get("refresh_token").unwrap(),
            Some("rt1".to_string())
        );
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileKeyValueStore::new(&path).unwrap();
        assert_eq!(store.get("access_token").unwrap(), None);

        // The next write repairs the file
        store.set("access_token", "at1").unwrap();
        let reopened = FileKeyValueStore::new(&path).unwrap();
        assert_eq!(
            reopened.get("access_token").unwrap(),
            Some("at1".to_string())
        );
    }

    #[test]
    fn test_missing_parent_directory_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("creds.json");

        let store = FileKeyValueStore::new(&path).unwrap();
        store.set("access_token", "at1").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.remove("missing").unwrap();
    }
}
