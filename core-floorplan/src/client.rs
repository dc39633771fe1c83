//! Authenticated floor-plan API client.
//!
//! Every operation runs through [`FloorPlanClient::authorized_fetch`]: obtain
//! an access token from the lifecycle manager, attach it as a bearer header,
//! issue the GET, parse the JSON body. When the API answers 401 the client
//! treats the credential as revoked server-side and hands the session to
//! [`SessionGuard::logout`] before surfacing the error.
//!
//! # Example
//!
//! ```no_run
//! use core_floorplan::{FloorPlanClient, GraphicsLayer, TileCoordinates};
//!
//! # async fn example(client: FloorPlanClient) -> core_floorplan::Result<()> {
//! let floor = client.get_floor_graphics("m2033625").await?;
//! let seats = client.get_seats("m2033625").await?;
//!
//! let tile = client
//!     .get_tile(
//!         "m2033625",
//!         GraphicsLayer::Architect,
//!         TileCoordinates { x: 0, y: 0, z: 2 },
//!     )
//!     .await?;
//! // `tile` is a data URL ready to hand to the renderer
//! # Ok(())
//! # }
//! ```

use crate::error::{FloorPlanError, Result};
use crate::types::{FloorGraphics, GraphicsLayer, ItemList, Seat, TileCoordinates};
use bridge_traits::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use core_auth::{AuthError, LoginRedirector, SessionGuard, TokenLifecycleManager};
use core_runtime::config::{FeatureFlags, FloorApiConfig};
use core_runtime::events::{CoreEvent, DataEvent, EventBus};
use lru::LruCache;
use serde::de::DeserializeOwned;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Client for the floor-plan data API.
///
/// Cheap to share behind an `Arc`; all interior state is the tile cache.
pub struct FloorPlanClient {
    api: FloorApiConfig,
    http_client: Arc<dyn HttpClient>,
    manager: Arc<TokenLifecycleManager>,
    session_guard: SessionGuard,
    event_bus: EventBus,
    /// Tile documents keyed by full request URL; `None` when caching is off.
    tile_cache: Option<RwLock<LruCache<String, String>>>,
    auto_login_redirect: bool,
    login_redirector: Option<LoginRedirector>,
}

impl FloorPlanClient {
    /// Creates a new client.
    ///
    /// The tile cache is sized from [`FloorApiConfig::tile_cache_entries`]
    /// and skipped entirely when the feature flag disables it.
    pub fn new(
        api: FloorApiConfig,
        features: FeatureFlags,
        http_client: Arc<dyn HttpClient>,
        manager: Arc<TokenLifecycleManager>,
        session_guard: SessionGuard,
        event_bus: EventBus,
    ) -> Self {
        let tile_cache = features.enable_tile_cache.then(|| {
            let capacity =
                NonZeroUsize::new(api.tile_cache_entries).unwrap_or(NonZeroUsize::MIN);
            RwLock::new(LruCache::new(capacity))
        });

        Self {
            api,
            http_client,
            manager,
            session_guard,
            event_bus,
            tile_cache,
            auto_login_redirect: features.auto_login_redirect,
            login_redirector: None,
        }
    }

    /// Attach a [`LoginRedirector`] used when no credential path remains.
    ///
    /// With [`FeatureFlags::auto_login_redirect`] set, a fetch that fails
    /// because the user is not authenticated sends the host to the login
    /// page instead of leaving them on a dead screen. Without a redirector
    /// the flag has no effect.
    pub fn with_login_redirector(mut self, redirector: LoginRedirector) -> Self {
        self.login_redirector = Some(redirector);
        self
    }

    /// Fetches a JSON document from an authenticated endpoint.
    ///
    /// # Errors
    ///
    /// - [`FloorPlanError::Auth`] if no access token could be obtained
    /// - [`FloorPlanError::ApiError`] on any non-2xx status; a 401
    ///   additionally clears the stored session via [`SessionGuard`]
    /// - [`FloorPlanError::ParseError`] if the body is not the expected shape
    pub async fn authorized_fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.fetch_raw(url).await?;

        response
            .json()
            .map_err(|e| FloorPlanError::ParseError(e.to_string()))
    }

    #[instrument(skip(self, url))]
    async fn fetch_raw(&self, url: &str) -> Result<HttpResponse> {
        let access_token = match self.manager.get_access_token().await {
            Ok(token) => token,
            Err(err) => {
                if self.auto_login_redirect && matches!(err, AuthError::NotAuthenticated) {
                    if let Some(redirector) = &self.login_redirector {
                        info!("No credential path left, starting login redirect");
                        // Best effort: the auth error is surfaced either way.
                        if let Err(e) = redirector.redirect_to_login() {
                            warn!(error = %e, "Failed to redirect to login");
                        }
                    }
                }
                return Err(err.into());
            }
        };

        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(access_token)
            .header("Accept", "application/json");

        let response = self.http_client.execute(request).await?;

        if response.status == 401 {
            warn!("API rejected the access token, clearing session");
            let _ = self.event_bus.emit(CoreEvent::Data(DataEvent::CredentialsRejected {
                status: response.status,
            }));

            // Best effort: the 401 is surfaced either way.
            if let Err(e) = self.session_guard.logout() {
                warn!(error = %e, "Failed to clear session after rejection");
            }

            return Err(FloorPlanError::ApiError {
                status_code: response.status,
                message: "Access token rejected".to_string(),
            });
        }

        if !response.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(FloorPlanError::ApiError {
                status_code: response.status,
                message,
            });
        }

        Ok(response)
    }

    /// Fetches the renderable geometry for a floor.
    pub async fn get_floor_graphics(&self, floor_id: &str) -> Result<FloorGraphics> {
        let url = format!(
            "{}/{}/floors/{}/graphics",
            self.api.base_url,
            self.api.company_id,
            urlencoding::encode(floor_id)
        );

        let floor: FloorGraphics = self.authorized_fetch(&url).await?;

        info!(
            floor_id = floor_id,
            spaces = floor.space_graphics.len(),
            layers = floor.graphics_layers.len(),
            "Loaded floor graphics"
        );
        let _ = self.event_bus.emit(CoreEvent::Data(DataEvent::FloorGraphicsLoaded {
            floor_id: floor_id.to_string(),
            space_count: floor.space_graphics.len(),
        }));

        Ok(floor)
    }

    /// Fetches the seat positions on a floor.
    pub async fn get_seats(&self, floor_id: &str) -> Result<Vec<Seat>> {
        let url = format!(
            "{}/{}/seats?floorId={}",
            self.api.base_url,
            self.api.company_id,
            urlencoding::encode(floor_id)
        );

        let list: ItemList<Seat> = self.authorized_fetch(&url).await?;

        debug!(floor_id = floor_id, seats = list.items.len(), "Loaded seats");
        let _ = self.event_bus.emit(CoreEvent::Data(DataEvent::SeatsLoaded {
            floor_id: floor_id.to_string(),
            seat_count: list.items.len(),
        }));

        Ok(list.items)
    }

    /// Fetches one map tile as a data-URL string.
    ///
    /// Tiles are immutable for a given floor revision, so responses are kept
    /// in a bounded LRU keyed by the full request URL. A renderer panning
    /// back and forth re-reads from memory instead of the API.
    pub async fn get_tile(
        &self,
        floor_id: &str,
        layer: GraphicsLayer,
        coordinates: TileCoordinates,
    ) -> Result<String> {
        let url = format!(
            "{}/{}/floors/{}/tiles?layer={}&x={}&y={}&z={}",
            self.api.base_url,
            self.api.company_id,
            urlencoding::encode(floor_id),
            u8::from(layer),
            coordinates.x,
            coordinates.y,
            coordinates.z
        );

        if let Some(cache) = &self.tile_cache {
            if let Some(tile) = cache.write().await.get(&url).cloned() {
                debug!("Tile cache hit");
                return Ok(tile);
            }
        }

        // The tile endpoint returns a JSON-encoded string holding a data URL.
        let tile: String = self.authorized_fetch(&url).await?;

        if let Some(cache) = &self.tile_cache {
            cache.write().await.put(url, tile.clone());
        }

        Ok(tile)
    }
}
