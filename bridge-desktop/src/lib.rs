//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations of the bridge traits
//! using desktop-appropriate libraries:
//! - `HttpClient` using `reqwest`
//! - `KeyValueStore` as an in-memory map (session-scoped), a JSON file in
//!   the user config directory (durable), or the OS keychain via `keyring`
//! - `Navigator` as an in-process URL holder for hosts without a browser
//!   location
//!
//! ## Feature Flags
//!
//! - `secure-store`: Enable OS keychain integration (default)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{FileKeyValueStore, ReqwestHttpClient};
//! use bridge_traits::{HttpClient, KeyValueStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http_client = ReqwestHttpClient::new();
//!     let store = FileKeyValueStore::with_default_path().unwrap();
//!
//!     // Use in core configuration
//! }
//! ```

mod file_store;
mod http;
mod memory_store;
mod navigator;

#[cfg(feature = "secure-store")]
mod secure_store;

pub use file_store::FileKeyValueStore;
pub use http::ReqwestHttpClient;
pub use memory_store::MemoryKeyValueStore;
pub use navigator::InProcessNavigator;

#[cfg(feature = "secure-store")]
pub use secure_store::KeyringKeyValueStore;
