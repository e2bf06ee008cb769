//! Transport trait for mocking
//!
//! The client talks to the device through this trait. The reqwest-backed
//! `HttpTransport` implements it, and tests use `MockTransport`.

use crate::error::AxapiError;
use crate::models::{Method, RawResponse};
use serde_json::Value;

/// One outgoing AxAPI call
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    pub method: Method,
    /// Absolute URL
    pub url: &'a str,
    /// Value of the `Authorization` header, absent only for `auth`
    pub authorization: Option<&'a str>,
    /// JSON body, sent for POST
    pub body: Option<&'a Value>,
}

/// Trait for the HTTP exchange underneath the client
///
/// Implementations must report an unreachable device as
/// `AxapiError::Connection` and must not interpret the status code.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest<'_>) -> Result<RawResponse, AxapiError>;
}
