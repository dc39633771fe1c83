//! In-Memory Credential Storage

use bridge_traits::{error::Result, storage::KeyValueStore};
use std::collections::HashMap;
use std::sync::Mutex;

/// Session-scoped key-value store backed by a process-local map
///
/// The desktop analog of `sessionStorage`: credentials live exactly as long
/// as the process. Choose this backend when tokens must not survive a
/// restart.
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryKeyValueStore::new();

        assert_eq!(store.get("access_token").unwrap(), None);

        store.set("access_token", "at1").unwrap();
        assert_eq!(store.get("access_token").unwrap(), Some("at1".to_string()));

        store.set("access_token", "at2").unwrap();
        assert_eq!(store.get("access_token").unwrap(), Some("at2".to_string()));

        store.remove("access_token").unwrap();
        assert_eq!(store.get("access_token").unwrap(), None);

        // Removing an absent key is not an error
        store.remove("access_token").unwrap();
    }
}
