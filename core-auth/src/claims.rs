//! Reading display claims out of a JWT access token.
//!
//! The viewer only needs the `sub` claim to show who is signed in. The token
//! is *not* verified here; trust decisions stay with the API that receives
//! the token as a bearer credential. In particular, token expiry is tracked
//! from the token endpoint's `expires_in`, never read out of the JWT.

use crate::error::{AuthError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// Claims extracted from an access token for presentation purposes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// The `sub` claim identifying the signed-in user.
    #[serde(rename = "sub")]
    pub subject: String,
}

/// Decode the payload segment of a JWT access token.
///
/// # Errors
///
/// Returns [`AuthError::MalformedToken`] if the token does not have exactly
/// three dot-separated segments, the payload is not valid unpadded base64url,
/// or the decoded payload is not JSON carrying a `sub` claim.
pub fn decode_claims(access_token: &str) -> Result<Claims> {
    let mut segments = access_token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let decoded = URL_SAFE_NO_PAD.decode(payload).map_err(|e| {
        AuthError::MalformedToken(format!("payload is not valid base64url: {}", e))
    })?;

    serde_json::from_slice(&decoded)
        .map_err(|e| AuthError::MalformedToken(format!("payload is not a valid claims object: {}", e)))
}
