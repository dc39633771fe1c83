//! Navigation Abstraction
//!
//! Provides a platform-agnostic view of the client's current location, the
//! seam through which the authorization code arrives and login redirects
//! leave.

use crate::error::Result;

/// Browser-style navigation trait
///
/// Abstracts the host's location handling:
/// - Web: `location` / `history`
/// - Desktop: embedded web view, or an in-process URL holder for headless
///   hosts
///
/// The core uses this trait for exactly three things: reading the current
/// URL to find a one-time `code` query parameter, rewriting the URL to
/// consume that parameter without triggering a reload, and the two hard
/// side effects at the edges of the session (redirect to the authorization
/// server, full reload on logout).
pub trait Navigator: Send + Sync {
    /// The full current URL, including any query string
    fn current_url(&self) -> Result<String>;

    /// Replace the visible URL without reloading
    ///
    /// Mirrors `history.replaceState`: the document stays alive, only the
    /// address changes. Used to consume the one-time authorization code.
    fn replace_url(&self, url: &str) -> Result<()>;

    /// Navigate away to an external URL
    ///
    /// Mirrors `location.assign`: control leaves the application. Execution
    /// resumes on a later page load, not on return from this call.
    fn navigate(&self, url: &str) -> Result<()>;

    /// Reload the client from scratch
    ///
    /// Mirrors `location.reload`: guarantees no component retains state
    /// from before the reload.
    fn reload(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct StubNavigator {
        url: Mutex<String>,
        reloads: Mutex<u32>,
    }

    impl Navigator for StubNavigator {
        fn current_url(&self) -> Result<String> {
            Ok(self.url.lock().unwrap().clone())
        }

        fn replace_url(&self, url: &str) -> Result<()> {
            *self.url.lock().unwrap() = url.to_string();
            Ok(())
        }

        fn navigate(&self, url: &str) -> Result<()> {
            *self.url.lock().unwrap() = url.to_string();
            Ok(())
        }

        fn reload(&self) -> Result<()> {
            *self.reloads.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_navigator_contract() {
        let nav = StubNavigator {
            url: Mutex::new("https://app.example.com/?code=abc".to_string()),
            reloads: Mutex::new(0),
        };

        assert!(nav.current_url().unwrap().contains("code=abc"));

        nav.replace_url("https://app.example.com/").unwrap();
        assert_eq!(nav.current_url().unwrap(), "https://app.example.com/");

        nav.reload().unwrap();
        assert_eq!(*nav.reloads.lock().unwrap(), 1);
    }
}
