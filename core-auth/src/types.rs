//! Token data carried through the authentication flow.
//!
//! Two shapes live here: [`TokenSet`] is a complete, validated set of
//! credentials ready to be persisted, while [`CredentialRecord`] is whatever
//! currently sits in storage (possibly partial, possibly stale). Keeping
//! them separate means the rest of the crate never has to guess whether an
//! `Option` is "not loaded yet" or "legitimately absent".

use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// A complete set of OAuth 2.0 credentials with an absolute expiry deadline.
///
/// The deadline is fixed the moment a token grant is received; every later
/// validity check compares against this stored instant, so the clock is read
/// in exactly one place per decision.
///
/// # Security
///
/// Tokens must never be logged. The `Debug` implementation redacts both
/// token fields.
///
/// # Examples
///
/// ```
/// use core_auth::TokenSet;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
/// let tokens = TokenSet::from_grant("ya29.a0...".to_string(), None, 3600, now);
///
/// assert_eq!(tokens.expires_at, now + Duration::seconds(3600));
/// assert!(!tokens.is_expired_at(now));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    /// Bearer token presented to resource servers.
    pub access_token: String,
    /// Long-lived token used to obtain new access tokens, when the
    /// authorization server issued one.
    pub refresh_token: Option<String>,
    /// Instant after which `access_token` must no longer be used.
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Build a token set from the relative lifetime reported by the token
    /// endpoint, anchored to the provided `now`.
    ///
    /// # Arguments
    ///
    /// * `access_token` - The granted access token
    /// * `refresh_token` - The granted refresh token, if any
    /// * `expires_in` - Seconds until the access token expires
    /// * `now` - The instant the grant was received
    pub fn from_grant(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: now + Duration::seconds(expires_in),
        }
    }

    /// Check whether the access token has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Get the remaining lifetime as of `now`.
    ///
    /// Returns `None` once the token is expired.
    pub fn time_until_expiry(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.is_expired_at(now) {
            None
        } else {
            Some(self.expires_at - now)
        }
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Credentials as read back from storage.
///
/// Any field may be missing: a first run has nothing, an interrupted save may
/// have left only some keys, and an unparsable expiry is surfaced as `None`.
/// The decision logic treats every gap as "that credential is unavailable".
///
/// # Examples
///
/// ```
/// use core_auth::CredentialRecord;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
/// let record = CredentialRecord {
///     access_token: Some("token".to_string()),
///     refresh_token: None,
///     expires_at: Some(now + Duration::seconds(30)),
/// };
///
/// assert_eq!(record.usable_access_token(now, Duration::zero()), Some("token"));
/// assert_eq!(record.usable_access_token(now, Duration::seconds(60)), None);
/// ```
#[derive(Clone, Default)]
pub struct CredentialRecord {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    /// Return the stored access token if it exists and is still valid at
    /// `now`, keeping `margin` of headroom before the recorded expiry.
    ///
    /// A token with no recorded expiry is never considered usable.
    pub fn usable_access_token(&self, now: DateTime<Utc>, margin: Duration) -> Option<&str> {
        let token = self.access_token.as_deref()?;
        let expires_at = self.expires_at?;
        (now < expires_at - margin).then_some(token)
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
