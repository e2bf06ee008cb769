//! AxAPI client errors

use thiserror::Error;

/// Errors that can occur when talking to an ACOS device
#[derive(Debug, Error)]
pub enum AxapiError {
    /// Device could not be reached (connection refused, unreachable, DNS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered with an error object (`response.err.msg`)
    #[error("AxAPI error: {0}")]
    Api(String),

    /// Credentials rejected or auth response missing the signature
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A call was attempted before `authenticate` succeeded
    #[error("Not authenticated: call authenticate() first")]
    NotAuthenticated,

    /// Response did not have the shape the caller needed
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unknown accessor or wrong number of arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
