use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Credential storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Navigation unavailable: {0}")]
    NavigationUnavailable(String),

    #[error("Invalid auth configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
