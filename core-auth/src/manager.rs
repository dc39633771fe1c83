//! # Token Lifecycle Manager
//!
//! Single entry point for obtaining a usable access token.
//!
//! ## Overview
//!
//! [`TokenLifecycleManager::get_access_token`] walks a fixed decision
//! sequence over the stored credentials and the current URL:
//!
//! 1. A stored access token that is still valid is returned as-is.
//! 2. Otherwise, a stored refresh token is redeemed at the token endpoint.
//! 3. Otherwise, a one-time `code` query parameter on the current URL is
//!    exchanged (and stripped from the URL first, whatever the outcome).
//! 4. Otherwise the call fails with [`AuthError::NotAuthenticated`] and the
//!    host is expected to start an interactive login.
//!
//! There is no fallthrough: a failure in the chosen branch is terminal for
//! that call. The whole read-decide-write cycle runs under one async lock,
//! so concurrent callers cannot trigger duplicate refreshes or try to spend
//! the same authorization code twice.
//!
//! ## Usage
//!
//! ```no_run
//! use core_auth::{OAuthConfig, TokenLifecycleManager, TokenStore};
//! use core_runtime::events::EventBus;
//! use std::sync::Arc;
//! # use bridge_traits::{Clock, HttpClient, KeyValueStore, Navigator};
//! # async fn example(
//! #     http_client: Arc<dyn HttpClient>,
//! #     store: Arc<dyn KeyValueStore>,
//! #     navigator: Arc<dyn Navigator>,
//! #     clock: Arc<dyn Clock>,
//! # ) -> core_auth::Result<()> {
//! let config = OAuthConfig {
//!     oauth_base_url: "https://auth.example.com/oauth".to_string(),
//!     client_id: "viewer-client".to_string(),
//!     client_secret: "secret".to_string(),
//!     redirect_uri: "https://viewer.example.com/floor".to_string(),
//!     scope: "floorplan.read".to_string(),
//! };
//!
//! let manager = TokenLifecycleManager::new(
//!     config,
//!     TokenStore::new(store),
//!     http_client,
//!     navigator,
//!     clock,
//!     EventBus::default(),
//! )?;
//!
//! let token = manager.get_access_token().await?;
//! // Attach `token` as a bearer credential on API calls...
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::oauth::{OAuthClient, OAuthConfig};
use crate::token_store::TokenStore;
use crate::types::TokenSet;
use bridge_traits::{Clock, HttpClient, Navigator};
use chrono::Duration;
use core_runtime::config::CoreConfig;
use core_runtime::events::{AuthEvent, CoreEvent, EventBus};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Orchestrates credential lookup, refresh and authorization-code exchange.
///
/// All host interaction goes through injected bridges: storage, HTTP, URL
/// navigation and the clock. The manager itself never opens a login page;
/// it only reports (via [`AuthError::NotAuthenticated`] and the
/// `LoginRequired` event) that one is needed.
pub struct TokenLifecycleManager {
    token_store: TokenStore,
    oauth: OAuthClient,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    event_bus: EventBus,
    /// Headroom subtracted from the stored expiry when judging validity.
    expiry_margin: Duration,
    /// Serializes the whole read-decide-write cycle.
    flow_lock: Mutex<()>,
}

impl TokenLifecycleManager {
    /// Creates a new manager.
    ///
    /// The OAuth configuration is validated eagerly so a misconfigured host
    /// fails at startup rather than on the first token request.
    ///
    /// # Arguments
    ///
    /// * `config` - OAuth client configuration
    /// * `token_store` - Credential persistence
    /// * `http_client` - Host HTTP bridge used for token endpoint calls
    /// * `navigator` - Host URL bridge used to find and strip the `code`
    /// * `clock` - Time source used for expiry decisions
    /// * `event_bus` - Bus for lifecycle events
    pub fn new(
        config: OAuthConfig,
        token_store: TokenStore,
        http_client: Arc<dyn HttpClient>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
        event_bus: EventBus,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            token_store,
            oauth: OAuthClient::new(config, http_client),
            navigator,
            clock,
            event_bus,
            expiry_margin: Duration::zero(),
            flow_lock: Mutex::new(()),
        })
    }

    /// Creates a manager from an assembled [`CoreConfig`].
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::InvalidConfig`] if the core configuration is
    /// missing the HTTP client or navigator bridge.
    pub fn from_config(
        core: &CoreConfig,
        oauth_config: OAuthConfig,
        event_bus: EventBus,
    ) -> Result<Self> {
        let http_client = core.http_client.clone().ok_or_else(|| {
            AuthError::InvalidConfig(
                "CoreConfig has no HTTP client; provide one or enable a desktop default"
                    .to_string(),
            )
        })?;
        let navigator = core.navigator.clone().ok_or_else(|| {
            AuthError::InvalidConfig(
                "CoreConfig has no navigator; provide one or enable a desktop default".to_string(),
            )
        })?;

        Self::new(
            oauth_config,
            TokenStore::new(core.token_store.clone()),
            http_client,
            navigator,
            core.clock.clone(),
            event_bus,
        )
    }

    /// Sets how long before the stored expiry a token is already treated as
    /// expired.
    ///
    /// Defaults to zero: a token is used right up to its recorded deadline.
    pub fn with_expiry_margin(mut self, margin: Duration) -> Self {
        self.expiry_margin = margin;
        self
    }

    /// Returns a usable access token, acquiring one if necessary.
    ///
    /// Exactly one of the four lifecycle branches runs per call (cached,
    /// refresh, code exchange, not authenticated); see the module docs for
    /// the order. Newly granted tokens are persisted before this method
    /// returns, with their expiry anchored to the clock at the moment the
    /// grant was received.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TokenRefreshFailed`] / [`AuthError::TokenExchangeFailed`]
    ///   if the chosen grant fails; no other branch is attempted
    /// - [`AuthError::StorageUnavailable`] if credentials cannot be read or a
    ///   fresh grant cannot be persisted
    /// - [`AuthError::NavigationUnavailable`] if the current URL cannot be
    ///   read or rewritten while consuming an authorization code
    /// - [`AuthError::NotAuthenticated`] if no credential source is left
    #[instrument(skip(self))]
    pub async fn get_access_token(&self) -> Result<String> {
        let _guard = self.flow_lock.lock().await;

        let now = self.clock.now();
        let record = self.token_store.load()?;

        if let Some(token) = record.usable_access_token(now, self.expiry_margin) {
            debug!("Using cached access token");
            return Ok(token.to_string());
        }

        if let Some(refresh_token) = record.refresh_token.as_deref() {
            info!("Access token missing or expired, refreshing");
            let _ = self
                .event_bus
                .emit(CoreEvent::Auth(AuthEvent::TokenRefreshing));

            let grant = self
                .oauth
                .refresh_access_token(refresh_token)
                .await
                .map_err(|e| {
                    error!("Token refresh failed: {}", e);
                    let event = CoreEvent::Auth(AuthEvent::AuthError {
                        message: format!("Token refresh failed: {}", e),
                        recoverable: true,
                    });
                    let _ = self.event_bus.emit(event);
                    e
                })?;

            let tokens = TokenSet::from_grant(
                grant.access_token,
                grant.refresh_token,
                grant.expires_in,
                self.clock.now(),
            );
            self.persist(&tokens)?;

            let event = CoreEvent::Auth(AuthEvent::TokenRefreshed {
                expires_at: tokens.expires_at.timestamp(),
            });
            let _ = self.event_bus.emit(event);

            return Ok(tokens.access_token);
        }

        if let Some(code) = self.consume_authorization_code()? {
            info!("Found authorization code in URL, exchanging for tokens");

            let grant = self.oauth.exchange_code(&code).await.map_err(|e| {
                error!("Token exchange failed: {}", e);
                let event = CoreEvent::Auth(AuthEvent::AuthError {
                    message: format!("Token exchange failed: {}", e),
                    recoverable: true,
                });
                let _ = self.event_bus.emit(event);
                e
            })?;

            let tokens = TokenSet::from_grant(
                grant.access_token,
                grant.refresh_token,
                grant.expires_in,
                self.clock.now(),
            );
            self.persist(&tokens)?;

            let event = CoreEvent::Auth(AuthEvent::SignedIn {
                expires_at: tokens.expires_at.timestamp(),
            });
            let _ = self.event_bus.emit(event);

            return Ok(tokens.access_token);
        }

        debug!("No usable credentials available");
        let _ = self.event_bus.emit(CoreEvent::Auth(AuthEvent::LoginRequired));
        Err(AuthError::NotAuthenticated)
    }

    /// Looks for a `code` query parameter on the current URL and removes it.
    ///
    /// The code is stripped *before* it is handed to the caller, so it can
    /// never be spent twice even if the exchange that follows fails. All
    /// other query parameters (and the fragment) survive the rewrite.
    ///
    /// An unparsable current URL is not an error; there is simply no code
    /// to be found on it.
    fn consume_authorization_code(&self) -> Result<Option<String>> {
        let current = self.navigator.current_url().map_err(|e| {
            warn!(error = %e, "Failed to read the current URL");
            AuthError::NavigationUnavailable(e.to_string())
        })?;

        let url = match Url::parse(&current) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Current URL is not parsable, skipping code lookup");
                return Ok(None);
            }
        };

        let code = url
            .query_pairs()
            .find_map(|(key, value)| (key == "code").then(|| value.into_owned()));

        let Some(code) = code else {
            return Ok(None);
        };

        let remaining: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "code")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut stripped = url;
        stripped.set_query(None);
        if !remaining.is_empty() {
            let mut query = stripped.query_pairs_mut();
            for (key, value) in &remaining {
                query.append_pair(key, value);
            }
        }

        self.navigator.replace_url(stripped.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to strip the authorization code from the URL");
            AuthError::NavigationUnavailable(e.to_string())
        })?;

        debug!("Authorization code removed from the URL");

        Ok(Some(code))
    }

    fn persist(&self, tokens: &TokenSet) -> Result<()> {
        self.token_store.save(tokens).map_err(|e| {
            error!("Failed to store credentials: {}", e);
            let event = CoreEvent::Auth(AuthEvent::AuthError {
                message: format!("Failed to store credentials: {}", e),
                recoverable: false,
            });
            let _ = self.event_bus.emit(event);
            e
        })
    }
}
