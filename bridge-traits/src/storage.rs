//! Credential Storage Abstraction
//!
//! Provides a platform-agnostic trait for the string key-value store that
//! holds the credential record.

use crate::error::Result;

/// String key-value storage trait
///
/// Abstracts the host's credential storage:
/// - Web: `localStorage` / `sessionStorage`
/// - Desktop: config-directory file, OS keychain, or in-memory map
///
/// The choice of backing store decides retention (session-scoped vs.
/// durable); the core never assumes one. Operations are synchronous and
/// side-effect-only: implementations store and return raw strings without
/// validating their meaning. Interpreting token values and expiry is the
/// caller's job.
///
/// Same-process reads must observe the result of any previously completed
/// write. No cross-process consistency is required.
///
/// # Security
///
/// Values placed here include bearer credentials. Implementations must never
/// log stored values.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::KeyValueStore;
///
/// fn remember(store: &dyn KeyValueStore) -> Result<()> {
///     store.set("access_token", "opaque-value")?;
///     Ok(())
/// }
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the value for a key
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, overwriting any previous value for the key
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key
    ///
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MapStore {
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

    #[test]
    fn test_store_contract() {
        let store = MapStore {
            entries: Mutex::new(HashMap::new()),
        };

        assert_eq!(store.get("missing").unwrap(), None);

        store.set("access_token", "at1").unwrap();
        assert_eq!(store.get("access_token").unwrap(), Some("at1".to_string()));

        store.set("access_token", "at2").unwrap();
        assert_eq!(store.get("access_token").unwrap(), Some("at2".to_string()));

        store.remove("access_token").unwrap();
        assert_eq!(store.get("access_token").unwrap(), None);

        // Removing an absent key succeeds
        store.remove("access_token").unwrap();
    }
}
