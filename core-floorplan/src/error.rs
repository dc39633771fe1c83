//! Error types for the floor-plan data layer

use thiserror::Error;

/// Floor-plan data layer errors
#[derive(Error, Debug)]
pub enum FloorPlanError {
    /// API request returned an error status
    #[error("Floor-plan API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Token acquisition failed
    #[error(transparent)]
    Auth(#[from] core_auth::AuthError),

    /// Host bridge failure (network, storage)
    #[error(transparent)]
    Bridge(#[from] bridge_traits::BridgeError),
}

/// Result type for floor-plan operations
pub type Result<T> = std::result::Result<T, FloorPlanError>;
