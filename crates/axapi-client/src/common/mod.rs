//! Common HTTP plumbing for the AxAPI client
//!
//! Provides the reqwest-backed transport used against real devices.

use crate::config::ClientConfig;
use crate::error::AxapiError;
use crate::models::{Method, RawResponse};
use crate::transport::{Transport, TransportRequest};
use reqwest::Client;
use tracing::debug;

/// reqwest transport with the device's TLS and timeout settings
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, AxapiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(AxapiError::Http)?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest<'_>) -> Result<RawResponse, AxapiError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        };
        builder = builder
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(authorization) = request.authorization {
            builder = builder.header("Authorization", authorization);
        }
        if let Some(body) = request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                AxapiError::Connection(format!(
                    "could not connect to {}; make sure the device API service is reachable ({})",
                    request.url, e
                ))
            } else {
                AxapiError::Http(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(AxapiError::Http)?;
        Ok(RawResponse { status, body })
    }
}
