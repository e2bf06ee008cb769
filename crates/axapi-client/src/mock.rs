//! Mock transport for unit testing
//!
//! This module provides an in-memory implementation of `Transport` that can be
//! used in tests without a reachable ACOS device.

use crate::error::AxapiError;
use crate::models::{Method, RawResponse};
use crate::transport::{Transport, TransportRequest};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Owned copy of a request the mock has seen
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Mock transport for testing
///
/// Responses are queued up front and handed out in order, one per request.
/// Clones share the same queue and request log, so a test can keep a handle
/// after moving one into the client.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, AxapiError>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Create a mock with an empty response queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response (for test setup)
    pub fn push_response(&self, status: u16, body: impl Into<String>) -> &Self {
        lock(&self.responses).push_back(Ok(RawResponse::new(status, body)));
        self
    }

    /// Queue a JSON response with status 200 (for test setup)
    pub fn push_json(&self, body: Value) -> &Self {
        self.push_response(200, body.to_string())
    }

    /// Queue a transport failure (for test setup)
    pub fn push_error(&self, error: AxapiError) -> &Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Every request seen so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Number of queued responses not consumed yet
    pub fn pending(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest<'_>) -> Result<RawResponse, AxapiError> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            url: request.url.to_string(),
            authorization: request.authorization.map(str::to_string),
            body: request.body.cloned(),
        });

        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(AxapiError::Connection(format!(
                "mock transport has no response queued for {} {}",
                request.method, request.url
            )))
        })
    }
}
