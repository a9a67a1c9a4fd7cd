//! The HTTP client wrapper: single point of request egress.
//!
//! Every request picks up the bearer credential from the session context
//! and a fresh correlation id. Every response passes through the
//! authentication-failure interceptor: a 401 from any non-auth endpoint
//! invalidates the session and forces navigation to the login route
//! *before* the error is surfaced, so the caller's own error handling still
//! runs, but against an already-cleared session.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::paths;
use crate::domain::ports::{
    ApiRequest, ApiResponse, ApiTransport, FileUpload, Method, Navigator, RequestBody,
    TransportError,
};
use crate::domain::{ApiResult, Error, Route, SessionContext};

const UNAUTHORIZED: u16 = 401;

/// Query-string pairs, already stringified.
pub type Query = Vec<(String, String)>;

/// Configured request client shared by every resource client.
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionContext>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Wire the client over the shared session context and navigator.
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        session: Arc<SessionContext>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    /// `GET` a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Query) -> ApiResult<T> {
        let response = self
            .execute(Method::Get, path, query, RequestBody::Empty)
            .await?;
        decode(&response)
    }

    /// `POST` a JSON payload and decode the JSON reply.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
        payload: &impl Serialize,
    ) -> ApiResult<T> {
        let response = self
            .execute(Method::Post, path, query, json_body(payload)?)
            .await?;
        decode(&response)
    }

    /// `POST` a JSON payload, ignoring the reply body.
    pub async fn post_unit(
        &self,
        path: &str,
        query: Query,
        payload: &impl Serialize,
    ) -> ApiResult<()> {
        self.execute(Method::Post, path, query, json_body(payload)?)
            .await?;
        Ok(())
    }

    /// `PATCH` a JSON payload and decode the JSON reply.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
        payload: &impl Serialize,
    ) -> ApiResult<T> {
        let response = self
            .execute(Method::Patch, path, query, json_body(payload)?)
            .await?;
        decode(&response)
    }

    /// `DELETE` a resource, ignoring the reply body.
    pub async fn delete_unit(&self, path: &str, query: Query) -> ApiResult<()> {
        self.execute(Method::Delete, path, query, RequestBody::Empty)
            .await?;
        Ok(())
    }

    /// `POST` a multipart upload with a single `file` field, ignoring the
    /// reply body.
    pub async fn upload_unit(
        &self,
        path: &str,
        query: Query,
        upload: FileUpload,
    ) -> ApiResult<()> {
        self.execute(Method::Post, path, query, RequestBody::Multipart(upload))
            .await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: RequestBody,
    ) -> ApiResult<ApiResponse> {
        let request_id = Uuid::new_v4().to_string();
        let request = ApiRequest {
            method,
            path: path.to_owned(),
            query,
            body,
            bearer: self.session.token().map(|token| token.as_str().to_owned()),
            request_id: request_id.clone(),
        };

        tracing::debug!(method = method.as_str(), path, %request_id, "api request");
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(map_transport_error)?;

        if response.status == UNAUTHORIZED && !paths::is_auth_exempt(path) {
            // Forced logout runs before the rejection reaches the caller.
            tracing::warn!(path, %request_id, "session rejected by the server");
            self.session.invalidate();
            self.navigator.redirect(Route::Login);
        }

        if response.is_success() {
            Ok(response)
        } else {
            Err(map_status_error(response.status, &response.body))
        }
    }
}

fn json_body(payload: &impl Serialize) -> ApiResult<RequestBody> {
    let value = serde_json::to_value(payload)
        .map_err(|err| Error::internal(format!("failed to encode request payload: {err}")))?;
    Ok(RequestBody::Json(value))
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ApiResult<T> {
    serde_json::from_slice(&response.body)
        .map_err(|err| Error::transport(format!("invalid JSON payload: {err}")))
}

fn map_transport_error(error: TransportError) -> Error {
    match error {
        TransportError::Timeout { message } => Error::timeout(message),
        TransportError::Network { message } => Error::transport(message),
    }
}

/// Map a non-2xx status onto the error taxonomy, passing any server
/// `message` through verbatim.
fn map_status_error(status: u16, body: &[u8]) -> Error {
    let parsed: Option<serde_json::Value> = serde_json::from_slice(body).ok();
    let server_message = parsed
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(|message| message.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned);
    let message = server_message.unwrap_or_else(|| format!("request failed with status {status}"));

    let error = match status {
        400 | 422 => Error::invalid_request(message),
        401 => Error::unauthorized(message),
        403 => Error::forbidden(message),
        404 => Error::not_found(message),
        408 | 504 => Error::timeout(message),
        _ => Error::transport(message),
    };
    match parsed {
        Some(details) => error.with_details(details),
        None => error,
    }
}
