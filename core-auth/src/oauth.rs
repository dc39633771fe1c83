//! OAuth 2.0 token endpoint client.
//!
//! Implements the two grant types the viewer uses against its authorization
//! server: `authorization_code` (after the server redirects back with a
//! one-time code) and `refresh_token`. Client credentials travel in the form
//! body on every token request, matching the confidential-client setup of
//! the backing API.
//!
//! # Security
//!
//! - Tokens, authorization codes and the client secret are never logged
//! - The client secret is redacted from `Debug` output
//!
//! # Example
//!
//! ```no_run
//! use core_auth::oauth::{OAuthClient, OAuthConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> core_auth::Result<()> {
//! # use bridge_traits::HttpClient;
//! # let http_client: Arc<dyn HttpClient> = todo!();
//! let config = OAuthConfig {
//!     oauth_base_url: "https://auth.example.com/oauth".to_string(),
//!     client_id: "viewer-client".to_string(),
//!     client_secret: "secret".to_string(),
//!     redirect_uri: "https://viewer.example.com/floor".to_string(),
//!     scope: "floorplan.read".to_string(),
//! };
//! config.validate()?;
//!
//! let client = OAuthClient::new(config, http_client);
//! let grant = client.exchange_code("one-time-code").await?;
//! println!("Access token expires in {}s", grant.expires_in);
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use bridge_traits::{HttpClient, HttpMethod, HttpRequest};
use bytes::Bytes;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// OAuth 2.0 client configuration.
///
/// `oauth_base_url` is the root of the authorization server; the token and
/// authorize endpoints are derived from it by appending well-known paths.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Base URL of the authorization server, without a trailing slash.
    pub oauth_base_url: String,
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret, sent with every token request.
    pub client_secret: String,
    /// Redirect URI registered for this client.
    pub redirect_uri: String,
    /// Space-separated scopes to request during login.
    pub scope: String,
}

impl OAuthConfig {
    /// The token endpoint (`{oauth_base_url}/token`).
    pub fn token_url(&self) -> String {
        format!("{}/token", self.oauth_base_url)
    }

    /// The authorization endpoint (`{oauth_base_url}/authorize`).
    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.oauth_base_url)
    }

    /// Validate the configuration before first use.
    ///
    /// Catches the usual copy-paste mistakes (empty fields, trailing slash,
    /// unparsable base URL) up front instead of as confusing token-endpoint
    /// failures later.
    pub fn validate(&self) -> Result<()> {
        if self.oauth_base_url.is_empty() {
            return Err(AuthError::InvalidConfig(
                "OAuth base URL cannot be empty".to_string(),
            ));
        }

        if self.oauth_base_url.ends_with('/') {
            return Err(AuthError::InvalidConfig(
                "OAuth base URL must not end with '/'".to_string(),
            ));
        }

        if let Err(e) = Url::parse(&self.oauth_base_url) {
            return Err(AuthError::InvalidConfig(format!(
                "OAuth base URL is not a valid URL: {}",
                e
            )));
        }

        if self.client_id.is_empty() {
            return Err(AuthError::InvalidConfig(
                "OAuth client ID cannot be empty".to_string(),
            ));
        }

        if self.redirect_uri.is_empty() {
            return Err(AuthError::InvalidConfig(
                "OAuth redirect URI cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Custom Debug implementation to keep the client secret out of logs
impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("oauth_base_url", &self.oauth_base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Client for the authorization server's token endpoint.
pub struct OAuthClient {
    config: OAuthConfig,
    http_client: Arc<dyn HttpClient>,
}

impl OAuthClient {
    /// Create a new token endpoint client.
    pub fn new(config: OAuthConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Exchange a one-time authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Any failure (network, non-2xx status, unparsable response) comes back
    /// as [`AuthError::TokenExchangeFailed`]. Authorization codes are single
    /// use, so the caller must not retry with the same code.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("redirect_uri", &self.config.redirect_uri);
        params.insert("client_id", &self.config.client_id);
        params.insert("client_secret", &self.config.client_secret);

        debug!("Exchanging authorization code for tokens");

        let encoded_body = serde_urlencoded::to_string(&params).map_err(|e| {
            AuthError::TokenExchangeFailed(format!("Failed to encode token request: {}", e))
        })?;

        let request = HttpRequest::new(HttpMethod::Post, self.config.token_url())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Bytes::from(encoded_body));

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| AuthError::TokenExchangeFailed(e.to_string()))?;

        if !response.is_success() {
            let status = response.status;
            let error_body = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            warn!(
                status = status,
                error = %error_body,
                "Token exchange failed"
            );

            return Err(AuthError::TokenExchangeFailed(format!(
                "Token endpoint returned {}: {}",
                status, error_body
            )));
        }

        let token_response: TokenResponse = response.json().map_err(|e| {
            AuthError::TokenExchangeFailed(format!("Failed to parse token response: {}", e))
        })?;

        info!(
            expires_in = token_response.expires_in,
            has_refresh_token = token_response.refresh_token.is_some(),
            "Exchanged authorization code for tokens"
        );

        Ok(token_response)
    }

    /// Obtain a fresh access token using a refresh token.
    ///
    /// A single attempt is made; a failed refresh is terminal for this call
    /// and the caller decides what happens next. When the server does not
    /// reissue a refresh token, the one passed in is carried over in the
    /// returned grant so it stays available for the next refresh.
    ///
    /// # Errors
    ///
    /// Any failure comes back as [`AuthError::TokenRefreshFailed`].
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let mut params = HashMap::new();
        params.insert("grant_type", "refresh_token");
        params.insert("refresh_token", refresh_token);
        params.insert("redirect_uri", &self.config.redirect_uri);
        params.insert("client_id", &self.config.client_id);
        params.insert("client_secret", &self.config.client_secret);

        debug!("Refreshing access token");

        let encoded_body = serde_urlencoded::to_string(&params).map_err(|e| {
            AuthError::TokenRefreshFailed(format!("Failed to encode token request: {}", e))
        })?;

        let request = HttpRequest::new(HttpMethod::Post, self.config.token_url())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Bytes::from(encoded_body));

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| AuthError::TokenRefreshFailed(e.to_string()))?;

        if !response.is_success() {
            let status = response.status;
            let error_body = response
                .text()
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            warn!(
                status = status,
                error = %error_body,
                "Token refresh failed"
            );

            return Err(AuthError::TokenRefreshFailed(format!(
                "Token endpoint returned {}: {}",
                status, error_body
            )));
        }

        let mut token_response: TokenResponse = response.json().map_err(|e| {
            AuthError::TokenRefreshFailed(format!("Failed to parse token response: {}", e))
        })?;

        // Some servers only return a refresh token on the initial grant.
        token_response.refresh_token = token_response
            .refresh_token
            .or_else(|| Some(refresh_token.to_string()));

        info!(
            expires_in = token_response.expires_in,
            "Refreshed access token"
        );

        Ok(token_response)
    }
}

/// Token grant as returned by the token endpoint.
///
/// Unknown response fields (`token_type`, `scope`, ...) are ignored; only
/// what the lifecycle logic needs is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires. Required: a grant without a
    /// lifetime cannot be cached, so it is rejected as malformed.
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::HttpResponse;
    use mockall::mock;

    mock! {
        Http {}

        #[async_trait::async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn test_config() -> OAuthConfig {
        OAuthConfig {
            oauth_base_url: "https://auth.example.com/oauth".to_string(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "https://viewer.example.com/floor".to_string(),
            scope: "floorplan.read".to_string(),
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_endpoint_urls_derived_from_base() {
        let config = test_config();
        assert_eq!(config.token_url(), "https://auth.example.com/oauth/token");
        assert_eq!(
            config.authorize_url(),
            "https://auth.example.com/oauth/authorize"
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(test_config().validate().is_ok());

        let mut config = test_config();
        config.oauth_base_url = String::new();
        assert!(matches!(config.validate(), Err(AuthError::InvalidConfig(_))));

        let mut config = test_config();
        config.oauth_base_url = "https://auth.example.com/oauth/".to_string();
        assert!(matches!(config.validate(), Err(AuthError::InvalidConfig(_))));

        let mut config = test_config();
        config.oauth_base_url = "not a valid url".to_string();
        assert!(matches!(config.validate(), Err(AuthError::InvalidConfig(_))));

        let mut config = test_config();
        config.client_id = String::new();
        assert!(matches!(config.validate(), Err(AuthError::InvalidConfig(_))));

        let mut config = test_config();
        config.redirect_uri = String::new();
        assert!(matches!(config.validate(), Err(AuthError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let debug_str = format!("{:?}", test_config());
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("client-secret"));
    }

    #[tokio::test]
    async fn test_exchange_code_sends_form_request() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .withf(|request| {
                let body = std::str::from_utf8(request.body.as_ref().unwrap()).unwrap();
                request.url == "https://auth.example.com/oauth/token"
                    && request.headers.get("Content-Type").map(String::as_str)
                        == Some("application/x-www-form-urlencoded")
                    && body.contains("grant_type=authorization_code")
                    && body.contains("code=abc123")
                    && body.contains("client_id=client-id")
                    && body.contains("client_secret=client-secret")
                    && body.contains("redirect_uri=")
            })
            .times(1)
            .returning(|_| {
                Ok(json_response(
                    200,
                    r#"{"access_token":"at1","refresh_token":"rt1","expires_in":600}"#,
                ))
            });

        let client = OAuthClient::new(test_config(), Arc::new(http));
        let grant = client.exchange_code("abc123").await.unwrap();

        assert_eq!(grant.access_token, "at1");
        assert_eq!(grant.refresh_token.as_deref(), Some("rt1"));
        assert_eq!(grant.expires_in, 600);
    }

    #[tokio::test]
    async fn test_exchange_code_error_includes_status_and_body() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(400, "invalid_grant")));

        let client = OAuthClient::new(test_config(), Arc::new(http));
        let err = client.exchange_code("stale-code").await.unwrap_err();

        match err {
            AuthError::TokenExchangeFailed(message) => {
                assert!(message.contains("400"));
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exchange_code_transport_error() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::OperationFailed("connection reset".to_string())));

        let client = OAuthClient::new(test_config(), Arc::new(http));
        let err = client.exchange_code("abc123").await.unwrap_err();

        assert!(matches!(err, AuthError::TokenExchangeFailed(_)));
    }

    #[tokio::test]
    async fn test_refresh_retains_previous_refresh_token() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .withf(|request| {
                let body = std::str::from_utf8(request.body.as_ref().unwrap()).unwrap();
                body.contains("grant_type=refresh_token")
                    && body.contains("refresh_token=old-rt")
                    && body.contains("redirect_uri=")
                    && body.contains("client_id=client-id")
                    && body.contains("client_secret=client-secret")
            })
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"access_token":"at2","expires_in":900}"#)));

        let client = OAuthClient::new(test_config(), Arc::new(http));
        let grant = client.refresh_access_token("old-rt").await.unwrap();

        assert_eq!(grant.access_token, "at2");
        assert_eq!(grant.refresh_token.as_deref(), Some("old-rt"));
    }

    #[tokio::test]
    async fn test_refresh_uses_reissued_refresh_token() {
        let mut http = MockHttp::new();
        http.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                200,
                r#"{"access_token":"at2","refresh_token":"new-rt","expires_in":900}"#,
            ))
        });

        let client = OAuthClient::new(test_config(), Arc::new(http));
        let grant = client.refresh_access_token("old-rt").await.unwrap();

        assert_eq!(grant.refresh_token.as_deref(), Some("new-rt"));
    }

    #[tokio::test]
    async fn test_refresh_failure_is_terminal() {
        let mut http = MockHttp::new();
        // times(1) verifies no retry happens on a server error.
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(502, "bad gateway")));

        let client = OAuthClient::new(test_config(), Arc::new(http));
        let err = client.refresh_access_token("rt").await.unwrap_err();

        assert!(matches!(err, AuthError::TokenRefreshFailed(_)));
    }

    #[tokio::test]
    async fn test_grant_without_expires_in_is_malformed() {
        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"access_token":"at1"}"#)));

        let client = OAuthClient::new(test_config(), Arc::new(http));
        let err = client.exchange_code("abc123").await.unwrap_err();

        // A grant with no lifetime is rejected, not given an invented one.
        match err {
            AuthError::TokenExchangeFailed(message) => {
                assert!(message.contains("parse"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_token_response_ignores_extra_fields() {
        let json = r#"{
            "access_token": "token",
            "refresh_token": "refresh",
            "expires_in": 1800,
            "token_type": "Bearer",
            "scope": "floorplan.read"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "token");
        assert_eq!(response.refresh_token, Some("refresh".to_string()));
        assert_eq!(response.expires_in, 1800);
    }
}
