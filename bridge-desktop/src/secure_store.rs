//! Secure Credential Storage using OS Keychain

use bridge_traits::{
    error::{BridgeError, Result},
    storage::KeyValueStore,
};
use keyring::Entry;
use tracing::debug;

/// Keyring-based key-value store implementation
///
/// Uses platform-specific secure storage:
/// - macOS: Keychain
/// - Windows: Credential Manager (DPAPI)
/// - Linux: Secret Service (libsecret)
///
/// Each key becomes its own keyring entry under a shared service name, so the
/// three credential keys show up as three labeled secrets in the OS UI.
pub struct KeyringKeyValueStore {
    service_name: String,
}

impl KeyringKeyValueStore {
    /// Create a new secure store with default service name
    pub fn new() -> Self {
        Self {
            service_name: "floorplan-viewer-core".to_string(),
        }
    }

    /// Create a new secure store with custom service name
    pub fn with_service_name(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    /// Get a keyring entry for the given key
    fn get_entry(&self, key: &str) -> std::result::Result<Entry, keyring::Error> {
        Entry::new(&self.service_name, key)
    }

    /// Convert keyring error to BridgeError
    fn map_keyring_error(e: keyring::Error) -> BridgeError {
        BridgeError::OperationFailed(format!("Keyring error: {}", e))
    }
}

impl Default for KeyringKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for KeyringKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = self.get_entry(key).map_err(Self::map_keyring_error)?;

        match entry.get_password() {
            Ok(value) => {
                debug!(key = key, "Retrieved credential from keyring");
                Ok(Some(value))
            }
            Err(keyring::Error::NoEntry) => {
                debug!(key = key, "Credential not found in keyring");
                Ok(None)
            }
            Err(e) => Err(Self::map_keyring_error(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let entry = self.get_entry(key).map_err(Self::map_keyring_error)?;

        entry.set_password(value).map_err(Self::map_keyring_error)?;

        debug!(key = key, "Stored credential in keyring");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let entry = self.get_entry(key).map_err(Self::map_keyring_error)?;

        match entry.delete_credential() {
            Ok(_) => {
                debug!(key = key, "Deleted credential from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                // Already deleted, consider it success
                debug!(key = key, "Credential not found (already deleted)");
                Ok(())
            }
            Err(e) => Err(Self::map_keyring_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_service_name() {
        let store = KeyringKeyValueStore::with_service_name("test-service");
        assert_eq!(store.service_name, "test-service");
    }

    // Keyring operations require a real OS keychain and are covered by
    // manual platform testing, not unit tests.
}
