//! # Core Configuration Module
//!
//! Provides configuration management for the Floorplan Viewer Core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds all necessary dependencies and settings for the core library.
//! It enforces fail-fast validation to ensure all required bridges are provided
//! before initialization.
//!
//! ## Required Dependencies
//!
//! - `KeyValueStore` - Required for credential persistence
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//! - `Navigator` - URL inspection and navigation (desktop default: in-process)
//! - `Clock` - Time source (default: system clock)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults for
//! `KeyValueStore`, `HttpClient` and `Navigator` are injected automatically
//! if not provided.
//!
//! ## Usage
//!
//! ### Basic Configuration with Desktop Defaults
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ### Configuration with Custom Bridges
//!
//! ```ignore
//! use core_runtime::config::{CoreConfig, FloorApiConfig};
//! use std::sync::Arc;
//!
//! // Note: Requires implementing HttpClient, KeyValueStore, Navigator
//! let config = CoreConfig::builder()
//!     .floor_api(FloorApiConfig::new().with_company_id(1361))
//!     .http_client(Arc::new(MyHttpClient))
//!     .token_store(Arc::new(MyTokenStore))
//!     .navigator(Arc::new(MyNavigator))
//!     .enable_tile_cache(true)
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! The builder validates all required dependencies and provides actionable error
//! messages when capabilities are missing:
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! // Without the `desktop-shims` feature this fails with an actionable
//! // message naming the missing KeyValueStore capability.
//! let config = CoreConfig::builder().build();
//! ```

use crate::error::{Error, Result};
use bridge_traits::{Clock, HttpClient, KeyValueStore, Navigator, SystemClock};
use std::sync::Arc;

/// Core configuration for the Floorplan Viewer Core.
///
/// This struct holds all dependencies and settings required to initialize
/// the core library. Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// HTTP client for making API requests (optional with desktop default)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Credential persistence (required)
    pub token_store: Arc<dyn KeyValueStore>,

    /// URL inspection and navigation control (optional with desktop default)
    pub navigator: Option<Arc<dyn Navigator>>,

    /// Time source (defaults to the system clock)
    pub clock: Arc<dyn Clock>,

    /// Feature flags
    pub features: FeatureFlags,

    /// Floor-plan API configuration (base URL, tenant, cache sizing)
    pub floor_api: FloorApiConfig,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field("token_store", &"KeyValueStore { ... }")
            .field(
                "navigator",
                &self.navigator.as_ref().map(|_| "Navigator { ... }"),
            )
            .field("clock", &"Clock { ... }")
            .field("features", &self.features)
            .field("floor_api", &self.floor_api)
            .finish()
    }
}

/// Feature flags control optional functionality.
///
/// Features can be enabled during configuration to unlock additional capabilities,
/// but may require corresponding bridge implementations to function correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Enable the in-memory LRU cache for rendered map tiles
    pub enable_tile_cache: bool,

    /// Redirect to the login page automatically when no credentials are
    /// available (requires Navigator)
    pub auto_login_redirect: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_tile_cache: true,
            auto_login_redirect: false,
        }
    }
}

/// Configuration for the floor-plan data API.
///
/// Provides the service base URL, the tenant (company) scope every request is
/// made under, and sizing for the tile cache. These settings are used for:
/// - Building floor graphics, seat and tile request URLs
/// - Bounding memory spent on cached tile documents
///
/// # Example
///
/// ```no_run
/// use core_runtime::config::FloorApiConfig;
///
/// let config = FloorApiConfig::new()
///     .with_base_url("https://workplace.example.com/space/api/public/v1")
///     .with_company_id(1361)
///     .with_tile_cache_entries(256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorApiConfig {
    /// Base URL of the floor-plan API, without a trailing slash
    ///
    /// All endpoint paths are appended to this value, so a trailing slash
    /// would produce double-slash URLs and is rejected by validation.
    pub base_url: String,

    /// Company (tenant) identifier included in every API path
    pub company_id: u32,

    /// Maximum number of tile documents kept in the in-memory cache
    ///
    /// Default: 256 entries. Only consulted when the tile cache feature
    /// flag is enabled.
    pub tile_cache_entries: usize,
}

impl Default for FloorApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorApiConfig {
    /// Creates a new FloorApiConfig with development defaults
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost/space/api/public/v1".to_string(),
            company_id: 1361,
            tile_cache_entries: 256,
        }
    }

    /// Sets the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the company identifier
    pub fn with_company_id(mut self, company_id: u32) -> Self {
        self.company_id = company_id;
        self
    }

    /// Sets the tile cache capacity in entries
    pub fn with_tile_cache_entries(mut self, entries: usize) -> Self {
        self.tile_cache_entries = entries;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }

        if self.base_url.ends_with('/') {
            return Err(Error::Config(
                "API base URL must not end with a trailing slash".to_string(),
            ));
        }

        if self.company_id == 0 {
            return Err(Error::Config(
                "Company identifier must be greater than 0".to_string(),
            ));
        }

        if self.tile_cache_entries == 0 {
            return Err(Error::Config(
                "Tile cache capacity must be greater than 0 entries".to_string(),
            ));
        }

        if self.tile_cache_entries > 10_000 {
            return Err(Error::Config(
                "Tile cache capacity exceeds maximum of 10,000 entries".to_string(),
            ));
        }

        Ok(())
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder();
    /// ```
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Floor API settings are valid (base URL, tenant, cache sizing)
    /// - Feature flags are consistent with available bridges
    pub fn validate(&self) -> Result<()> {
        self.floor_api.validate()?;

        if self.features.auto_login_redirect && self.navigator.is_none() {
            return Err(Error::Config(
                "Auto login redirect enabled but no Navigator provided. \
                 Disable the feature or inject a Navigator implementation."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn token_store_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "KeyValueStore".to_string(),
        message: "KeyValueStore implementation is required for credential persistence. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default FileKeyValueStore. \
                 Web: inject a localStorage-backed store."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_token_store() -> Result<Arc<dyn KeyValueStore>> {
    use bridge_desktop::FileKeyValueStore;

    let store = FileKeyValueStore::with_default_path().map_err(|e| {
        Error::Internal(format!("Failed to initialize default token store: {}", e))
    })?;

    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_token_store() -> Result<Arc<dyn KeyValueStore>> {
    Err(token_store_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Option<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    Some(Arc::new(ReqwestHttpClient::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Option<Arc<dyn HttpClient>> {
    None
}

#[cfg(feature = "desktop-shims")]
fn provide_default_navigator() -> Option<Arc<dyn Navigator>> {
    use bridge_desktop::InProcessNavigator;

    Some(Arc::new(InProcessNavigator::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_navigator() -> Option<Arc<dyn Navigator>> {
    None
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](CoreConfigBuilder::build) to create the final config.
/// The builder validates required dependencies and provides helpful error
/// messages.
#[derive(Default)]
pub struct CoreConfigBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    token_store: Option<Arc<dyn KeyValueStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    clock: Option<Arc<dyn Clock>>,
    features: FeatureFlags,
    floor_api: Option<FloorApiConfig>,
}

impl CoreConfigBuilder {
    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client implementation
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the token store implementation (required).
    ///
    /// The token store persists the access token, refresh token and expiry
    /// timestamp between sessions. Hosts map it onto whatever durable
    /// key-value storage they have (localStorage on web, a credentials file
    /// or the OS keyring on desktop).
    ///
    /// # Arguments
    ///
    /// * `store` - Key-value store implementation
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use core_runtime::config::CoreConfig;
    /// use std::sync::Arc;
    ///
    /// let builder = CoreConfig::builder()
    ///     .token_store(Arc::new(MyTokenStore));
    /// ```
    pub fn token_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Sets the navigator implementation.
    ///
    /// The navigator exposes the current URL (where one-time authorization
    /// codes arrive), rewrites it without reloading, and drives login
    /// redirects and the post-logout reload.
    ///
    /// If not provided, an in-process default will be used when the
    /// `desktop-shims` feature is enabled.
    ///
    /// # Arguments
    ///
    /// * `navigator` - Navigator implementation
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Sets the time source implementation.
    ///
    /// Defaults to the system clock. Inject a fixed clock in tests to make
    /// token expiry decisions deterministic.
    ///
    /// # Arguments
    ///
    /// * `clock` - Time source implementation
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Enables or disables the in-memory tile cache.
    ///
    /// Default: true
    ///
    /// # Arguments
    ///
    /// * `enabled` - Whether to cache tile documents in memory
    pub fn enable_tile_cache(mut self, enabled: bool) -> Self {
        self.features.enable_tile_cache = enabled;
        self
    }

    /// Enables or disables automatic login redirects.
    ///
    /// Requires a `Navigator` to be provided.
    ///
    /// Default: false
    ///
    /// # Arguments
    ///
    /// * `enabled` - Whether to redirect to the login page when no
    ///   credentials are available
    pub fn auto_login_redirect(mut self, enabled: bool) -> Self {
        self.features.auto_login_redirect = enabled;
        self
    }

    /// Sets all feature flags at once.
    ///
    /// # Arguments
    ///
    /// * `features` - Feature flags to set
    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Sets the floor-plan API configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Floor API configuration
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core_runtime::config::{CoreConfig, FloorApiConfig};
    ///
    /// let api_config = FloorApiConfig::new()
    ///     .with_base_url("https://workplace.example.com/space/api/public/v1")
    ///     .with_company_id(1361);
    ///
    /// let builder = CoreConfig::builder()
    ///     .floor_api(api_config);
    /// ```
    pub fn floor_api(mut self, config: FloorApiConfig) -> Self {
        self.floor_api = Some(config);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// This validates all required dependencies are provided and returns
    /// an error with an actionable message if anything is missing.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if:
    /// - The required KeyValueStore is missing and no default is available
    /// - Configuration values are invalid
    /// - Feature flags are inconsistent with available bridges
    pub fn build(self) -> Result<CoreConfig> {
        let token_store = match self.token_store {
            Some(store) => store,
            None => provide_default_token_store()?,
        };

        let http_client = self.http_client.or_else(provide_default_http_client);
        let navigator = self.navigator.or_else(provide_default_navigator);
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        let config = CoreConfig {
            http_client,
            token_store,
            navigator,
            clock,
            features: self.features,
            floor_api: self.floor_api.unwrap_or_default(),
        };

        config.validate()?;

        Ok(config)
    }
}
