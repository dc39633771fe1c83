//! Persistence for OAuth credentials.
//!
//! Tokens are stored through the host's [`KeyValueStore`] bridge under three
//! well-known keys (`access_token`, `refresh_token`, `access_token_expiry`).
//! The expiry is written as decimal Unix seconds so any host can inspect it
//! without caring about date formats.
//!
//! ## Security
//!
//! - Token values are never logged; log lines carry only presence flags and
//!   expiry metadata
//! - A stored expiry that fails to parse is treated as absent, which makes
//!   the access token unusable rather than trusted forever
//!
//! ## Example
//!
//! ```no_run
//! use core_auth::{TokenSet, TokenStore};
//! use chrono::{TimeZone, Utc};
//! use std::sync::Arc;
//! # use bridge_traits::KeyValueStore;
//! # fn example(store: Arc<dyn KeyValueStore>) -> core_auth::Result<()> {
//! let token_store = TokenStore::new(store);
//!
//! let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
//! let tokens = TokenSet::from_grant("access".to_string(), None, 3600, now);
//! token_store.save(&tokens)?;
//!
//! let record = token_store.load()?;
//! assert!(record.access_token.is_some());
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::{CredentialRecord, TokenSet};
use bridge_traits::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const ACCESS_TOKEN_EXPIRY_KEY: &str = "access_token_expiry";

/// Storage for OAuth credentials on top of the host's key-value bridge.
///
/// Each credential lives under its own key, so a partially written set (for
/// example after an interrupted save) degrades to "missing credential" rather
/// than a parse failure on the next load.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    /// Create a new token store backed by the given key-value bridge.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        debug!("Initializing TokenStore");
        Self { store }
    }

    /// Load whatever credentials are currently stored.
    ///
    /// Missing keys simply come back as `None` fields. A stored expiry that
    /// is not a valid decimal Unix timestamp is logged and treated as absent.
    ///
    /// # Returns
    ///
    /// Returns the (possibly partial) stored record, or an error if the
    /// underlying store cannot be read at all.
    pub fn load(&self) -> Result<CredentialRecord> {
        let access_token = self.read_key(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.read_key(REFRESH_TOKEN_KEY)?;

        let expires_at = match self.read_key(ACCESS_TOKEN_EXPIRY_KEY)? {
            Some(raw) => {
                let parsed = parse_expiry(&raw);
                if parsed.is_none() {
                    warn!("Stored token expiry is not a valid Unix timestamp, treating it as absent");
                }
                parsed
            }
            None => None,
        };

        debug!(
            has_access_token = access_token.is_some(),
            has_refresh_token = refresh_token.is_some(),
            has_expiry = expires_at.is_some(),
            "Loaded stored credentials"
        );

        Ok(CredentialRecord {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Persist a complete token set, overwriting any previous credentials.
    ///
    /// The access token and its expiry are always written. A token set
    /// without a refresh token removes any previously stored refresh token,
    /// so storage never pairs a new access token with a stale refresh token
    /// it no longer belongs to.
    pub fn save(&self, tokens: &TokenSet) -> Result<()> {
        self.write_key(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.write_key(
            ACCESS_TOKEN_EXPIRY_KEY,
            &tokens.expires_at.timestamp().to_string(),
        )?;

        match &tokens.refresh_token {
            Some(refresh_token) => self.write_key(REFRESH_TOKEN_KEY, refresh_token)?,
            None => self.remove_key(REFRESH_TOKEN_KEY)?,
        }

        info!(
            has_refresh_token = tokens.refresh_token.is_some(),
            expires_at = tokens.expires_at.timestamp(),
            "Credentials stored"
        );

        Ok(())
    }

    /// Remove all stored credentials.
    ///
    /// Idempotent: clearing an empty store succeeds.
    pub fn clear(&self) -> Result<()> {
        self.remove_key(ACCESS_TOKEN_KEY)?;
        self.remove_key(REFRESH_TOKEN_KEY)?;
        self.remove_key(ACCESS_TOKEN_EXPIRY_KEY)?;

        info!("Stored credentials cleared");

        Ok(())
    }

    fn read_key(&self, key: &'static str) -> Result<Option<String>> {
        self.store.get(key).map_err(|e| {
            warn!(key, error = %e, "Failed to read from credential storage");
            AuthError::StorageUnavailable(e.to_string())
        })
    }

    fn write_key(&self, key: &'static str, value: &str) -> Result<()> {
        self.store.set(key, value).map_err(|e| {
            warn!(key, error = %e, "Failed to write to credential storage");
            AuthError::StorageUnavailable(e.to_string())
        })
    }

    fn remove_key(&self, key: &'static str) -> Result<()> {
        self.store.remove(key).map_err(|e| {
            warn!(key, error = %e, "Failed to remove from credential storage");
            AuthError::StorageUnavailable(e.to_string())
        })
    }
}

fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let secs = raw.parse::<i64>().ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0)
}
