//! Sign-out handling.

use crate::error::{AuthError, Result};
use crate::token_store::TokenStore;
use bridge_traits::Navigator;
use core_runtime::events::{AuthEvent, CoreEvent, EventBus};
use std::sync::Arc;
use tracing::{info, warn};

/// Clears the stored session and restarts the application UI.
///
/// Used both for explicit user sign-out and by the data layer when the
/// floor-plan API rejects the presented access token.
#[derive(Clone)]
pub struct SessionGuard {
    token_store: TokenStore,
    navigator: Arc<dyn Navigator>,
    event_bus: EventBus,
}

impl SessionGuard {
    /// Create a new session guard.
    pub fn new(token_store: TokenStore, navigator: Arc<dyn Navigator>, event_bus: EventBus) -> Self {
        Self {
            token_store,
            navigator,
            event_bus,
        }
    }

    /// Remove all stored credentials and reload the application.
    ///
    /// Credentials are cleared before the reload is attempted, so a failed
    /// reload can never leave a rejected token in place. `SignedOut` is
    /// emitted as soon as the store is empty.
    pub fn logout(&self) -> Result<()> {
        self.token_store.clear()?;

        let _ = self.event_bus.emit(CoreEvent::Auth(AuthEvent::SignedOut));

        info!("Session cleared, reloading application");

        self.navigator.reload().map_err(|e| {
            warn!(error = %e, "Failed to reload after sign-out");
            AuthError::NavigationUnavailable(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenSet;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::KeyValueStore;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl MapStore {
        fn new() -> Self {
            Self {
                values: Mutex::new(HashMap::new()),
            }
        }

        fn len(&self) -> usize {
            self.values.lock().unwrap().len()
        }
    }

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> BridgeResult<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> BridgeResult<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> BridgeResult<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> BridgeResult<Option<String>> {
            Err(BridgeError::OperationFailed("store offline".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> BridgeResult<()> {
            Err(BridgeError::OperationFailed("store offline".to_string()))
        }

        fn remove(&self, _key: &str) -> BridgeResult<()> {
            Err(BridgeError::OperationFailed("store offline".to_string()))
        }
    }

    struct StubNavigator {
        reloads: Mutex<u32>,
        fail_reload: bool,
    }

    impl StubNavigator {
        fn new() -> Self {
            Self {
                reloads: Mutex::new(0),
                fail_reload: false,
            }
        }

        fn failing() -> Self {
            Self {
                reloads: Mutex::new(0),
                fail_reload: true,
            }
        }

        fn reload_count(&self) -> u32 {
            *self.reloads.lock().unwrap()
        }
    }

    impl Navigator for StubNavigator {
        fn current_url(&self) -> BridgeResult<String> {
            Ok("https://viewer.example.com/floor".to_string())
        }

        fn replace_url(&self, _url: &str) -> BridgeResult<()> {
            Ok(())
        }

        fn navigate(&self, _url: &str) -> BridgeResult<()> {
            Ok(())
        }

        fn reload(&self) -> BridgeResult<()> {
            if self.fail_reload {
                return Err(BridgeError::NotAvailable("no browser".to_string()));
            }
            *self.reloads.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn seeded_store() -> (Arc<MapStore>, TokenStore) {
        let store = Arc::new(MapStore::new());
        let token_store = TokenStore::new(store.clone());
        let tokens = TokenSet::from_grant(
            "access".to_string(),
            Some("refresh".to_string()),
            3600,
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        );
        token_store.save(&tokens).unwrap();
        (store, token_store)
    }

    #[test]
    fn test_logout_clears_store_and_reloads() {
        let (store, token_store) = seeded_store();
        let navigator = Arc::new(StubNavigator::new());
        let guard = SessionGuard::new(token_store, navigator.clone(), EventBus::default());

        guard.logout().unwrap();

        assert_eq!(store.len(), 0);
        assert_eq!(navigator.reload_count(), 1);
    }

    #[test]
    fn test_logout_emits_signed_out() {
        let (_store, token_store) = seeded_store();
        let event_bus = EventBus::default();
        let mut events = event_bus.subscribe();
        let guard = SessionGuard::new(token_store, Arc::new(StubNavigator::new()), event_bus);

        guard.logout().unwrap();

        assert_eq!(
            events.try_recv().unwrap(),
            CoreEvent::Auth(AuthEvent::SignedOut)
        );
    }

    #[test]
    fn test_logout_reload_failure_still_clears_credentials() {
        let (store, token_store) = seeded_store();
        let guard = SessionGuard::new(
            token_store,
            Arc::new(StubNavigator::failing()),
            EventBus::default(),
        );

        let err = guard.logout().unwrap_err();

        assert!(matches!(err, AuthError::NavigationUnavailable(_)));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_logout_storage_failure_skips_reload() {
        let navigator = Arc::new(StubNavigator::new());
        let guard = SessionGuard::new(
            TokenStore::new(Arc::new(FailingStore)),
            navigator.clone(),
            EventBus::default(),
        );

        let err = guard.logout().unwrap_err();

        assert!(matches!(err, AuthError::StorageUnavailable(_)));
        assert_eq!(navigator.reload_count(), 0);
    }
}
