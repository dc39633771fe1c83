//! # Authentication Core
//!
//! OAuth 2.0 token lifecycle for the floor-plan viewer.
//!
//! ## Overview
//!
//! This crate owns every credential decision the viewer makes: reading and
//! persisting tokens through the host's key-value bridge, refreshing them at
//! the token endpoint, exchanging the one-time authorization code the server
//! appends to the redirect URL, and tearing the session down when the API
//! stops accepting it.
//!
//! ## Features
//!
//! - One-call token acquisition via [`TokenLifecycleManager::get_access_token`]
//! - Strict, single-flight decision order (cached, refresh, code, fail)
//! - Expiry tracked as an absolute deadline computed when a grant is stored
//! - Authorization codes stripped from the URL before they can be reused
//! - Lifecycle events on the shared [`core_runtime::events::EventBus`]
//! - Token redaction in all `Debug` output

pub mod claims;
pub mod error;
pub mod manager;
pub mod oauth;
pub mod redirect;
pub mod session;
pub mod token_store;
pub mod types;

pub use claims::{decode_claims, Claims};
pub use error::{AuthError, Result};
pub use manager::TokenLifecycleManager;
pub use oauth::{OAuthClient, OAuthConfig, TokenResponse};
pub use redirect::LoginRedirector;
pub use session::SessionGuard;
pub use token_store::TokenStore;
pub use types::{CredentialRecord, TokenSet};
