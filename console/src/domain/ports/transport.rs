//! Driven port for HTTP request execution.
//!
//! The client wrapper owns request shaping (paths, bearer credentials,
//! correlation ids) and response interpretation; implementations of this
//! port own nothing but the wire. That keeps the authentication-failure
//! interception deterministic in tests, where a scripted transport stands
//! in for the network.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Failures raised before any HTTP status is available.
    pub enum TransportError {
        /// The request ran out of time.
        Timeout { message: String } => "request timed out: {message}",
        /// Connection-level failure.
        Network { message: String } => "network failure: {message}",
    }
}

/// HTTP method subset used by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read a resource.
    Get,
    /// Create a resource or submit an action.
    Post,
    /// Partially update a resource.
    Patch,
    /// Delete (or deactivate) a resource.
    Delete,
}

impl Method {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A spreadsheet selected for upload, sent as the multipart `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original file name, forwarded in the multipart part.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Request payload shapes the console produces.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No payload.
    Empty,
    /// JSON document.
    Json(Value),
    /// Multipart form with a single `file` field.
    Multipart(FileUpload),
}

/// A fully shaped outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured origin, e.g. `/auth/login`.
    pub path: String,
    /// Query-string pairs, already stringified.
    pub query: Vec<(String, String)>,
    /// Request payload.
    pub body: RequestBody,
    /// Bearer credential attached when a session is active.
    pub bearer: Option<String>,
    /// Correlation id logged on both ends.
    pub request_id: String,
}

/// Raw response: status plus undecoded body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request executor boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Perform the request and return the raw response.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Scripted transport for tests: answers from a queue and records every
/// request it saw.
#[derive(Debug, Default)]
pub struct StaticTransport {
    planned: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl StaticTransport {
    /// Transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn plan(&self, result: Result<ApiResponse, TransportError>) {
        self.planned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }

    /// Queue a JSON response with the given status.
    pub fn plan_json(&self, status: u16, body: &Value) {
        self.plan(Ok(ApiResponse {
            status,
            body: body.to_string().into_bytes(),
        }));
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ApiTransport for StaticTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.planned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("no response planned")))
    }
}
