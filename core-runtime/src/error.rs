//! Runtime-level error type shared by configuration and bootstrap code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required bridge implementation was not provided and no platform
    /// default is available
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    /// A platform default failed to initialize
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
