//! In-Process Navigation

use bridge_traits::{error::Result, navigation::Navigator};
use std::sync::Mutex;
use tracing::{debug, info};

/// Navigator for hosts without a real browser location
///
/// Holds the "current URL" as plain process state. `replace_url` rewrites it
/// in place (the analog of `history.replaceState`); `navigate` and `reload`
/// have no page to act on, so they record the intent and log it, leaving the
/// embedding host to decide what a login redirect or a restart means for it.
pub struct InProcessNavigator {
    url: Mutex<String>,
}

impl InProcessNavigator {
    /// Create a navigator with a placeholder URL
    pub fn new() -> Self {
        Self::with_url("app://floorplan-viewer/")
    }

    /// Create a navigator positioned at the given URL
    ///
    /// Hosts that receive the OAuth redirect out of band (e.g. via a loopback
    /// listener) seed the navigator with the full redirect URL so the core
    /// can find and consume the `code` parameter on it.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Mutex::new(url.into()),
        }
    }
}

impl Default for InProcessNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for InProcessNavigator {
    fn current_url(&self) -> Result<String> {
        Ok(self.url.lock().unwrap().clone())
    }

    fn replace_url(&self, url: &str) -> Result<()> {
        debug!("Replacing current URL");
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<()> {
        // Query strings on the authorization URL carry the client secret;
        // log only that navigation happened, never the target's query.
        info!("Navigation requested");
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    fn reload(&self) -> Result<()> {
        info!("Reload requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_url_rewrites_in_place() {
        let nav = InProcessNavigator::with_url("app://viewer/?code=abc&floorId=7");

        nav.replace_url("app://viewer/?floorId=7").unwrap();

        assert_eq!(nav.current_url().unwrap(), "app://viewer/?floorId=7");
    }

    #[test]
    fn test_navigate_moves_to_target() {
        let nav = InProcessNavigator::new();

        nav.navigate("https://auth.example.com/oauth/authorize?response_type=code")
            .unwrap();

        assert!(nav.current_url().unwrap().starts_with("https://auth.example.com"));
    }

    #[test]
    fn test_reload_keeps_url() {
        let nav = InProcessNavigator::with_url("app://viewer/");

        nav.reload().unwrap();

        assert_eq!(nav.current_url().unwrap(), "app://viewer/");
    }
}
