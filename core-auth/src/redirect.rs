//! Redirecting the user to the authorization server's login page.
//!
//! Building the authorization URL is a pure function so it can be tested
//! and inspected without a browser; the only side effect lives in
//! [`LoginRedirector::redirect_to_login`], which hands the URL to the host's
//! [`Navigator`].

use crate::error::{AuthError, Result};
use crate::oauth::OAuthConfig;
use bridge_traits::Navigator;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Sends the user to the hosted login page to start a new authorization
/// code flow.
#[derive(Clone)]
pub struct LoginRedirector {
    config: OAuthConfig,
    navigator: Arc<dyn Navigator>,
}

impl LoginRedirector {
    /// Create a new redirector for the given OAuth configuration.
    pub fn new(config: OAuthConfig, navigator: Arc<dyn Navigator>) -> Self {
        Self { config, navigator }
    }

    /// Build the authorization URL the user must visit to log in.
    ///
    /// The backing authorization server expects the client credentials in
    /// the query string of the authorize request, so they are appended here
    /// alongside the standard `response_type=code` parameters.
    pub fn build_authorization_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.authorize_url()).map_err(|e| {
            AuthError::InvalidConfig(format!("Invalid authorization URL: {}", e))
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("response_type", "code");
            query.append_pair("client_id", &self.config.client_id);
            query.append_pair("redirect_uri", &self.config.redirect_uri);
            query.append_pair("scope", &self.config.scope);
            query.append_pair("client_secret", &self.config.client_secret);
        }

        Ok(url)
    }

    /// Navigate the host to the login page.
    pub fn redirect_to_login(&self) -> Result<()> {
        let url = self.build_authorization_url()?;

        info!("Redirecting to login page");

        self.navigator.navigate(url.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to navigate to login page");
            AuthError::NavigationUnavailable(e.to_string())
        })
    }
}
