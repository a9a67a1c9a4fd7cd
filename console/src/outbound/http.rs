//! Reqwest-backed transport adapter.
//!
//! This adapter owns transport details only: joining the configured origin
//! onto relative paths, header placement, multipart encoding, and the
//! timeout/network error split. Request semantics live in the client
//! wrapper above it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::ports::{
    ApiRequest, ApiResponse, ApiTransport, Method, RequestBody, TransportError,
};

const DEFAULT_USER_AGENT: &str = "ops360-console/0.1";

/// Transport adapter performing real HTTP requests against one origin.
pub struct ReqwestTransport {
    client: Client,
    origin: Url,
}

impl ReqwestTransport {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(origin: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, origin })
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = join_url(&self.origin, &request.path)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(bearer) = &request.bearer {
            builder = builder.bearer_auth(bearer);
        }
        builder = builder.header("X-Request-Id", &request.request_id);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(upload) => {
                let part =
                    reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
                builder.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(map_transport_error)?
            .to_vec();
        Ok(ApiResponse { status, body })
    }
}

/// Join a relative endpoint path onto the configured origin, preserving any
/// base path the origin carries.
fn join_url(origin: &Url, path: &str) -> Result<Url, TransportError> {
    let base = origin.as_str().trim_end_matches('/');
    let combined = format!("{base}{path}");
    Url::parse(&combined)
        .map_err(|err| TransportError::network(format!("invalid request URL {combined}: {err}")))
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network URL helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8000", "/users", "http://localhost:8000/users")]
    #[case("http://localhost:8000/", "/users", "http://localhost:8000/users")]
    #[case("https://ops.example.com/api/v1", "/auth/login", "https://ops.example.com/api/v1/auth/login")]
    fn origins_keep_their_base_path_when_joined(
        #[case] origin: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let origin = Url::parse(origin).expect("valid origin");
        let joined = join_url(&origin, path).expect("join succeeds");
        assert_eq!(joined.as_str(), expected);
    }
}
