//! Auth endpoints: unified login, password reset, invite acceptance.
//!
//! Login talks to one endpoint; the server decides admin versus staff
//! identity from the credentials. The earlier per-kind endpoint probe is a
//! superseded contract and deliberately not implemented.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::ports::LoginService;
use crate::domain::{
    Actor, ApiResult, Error, LoginCredentials, SessionSnapshot, SessionToken,
};

/// Auth endpoint client.
pub struct AuthApi {
    client: Arc<ApiClient>,
}

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginReply {
    access_token: String,
    actor: Actor,
}

#[derive(Debug, Serialize)]
struct RequestResetPayload<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetPasswordPayload<'a> {
    token: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AcceptInvitePayload<'a> {
    token: &'a str,
    password: &'a str,
}

impl AuthApi {
    /// Wire the auth client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token/actor pair.
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<SessionSnapshot> {
        let payload = LoginPayload {
            email: credentials.email(),
            password: credentials.password(),
        };
        let reply: LoginReply = self
            .client
            .post(paths::LOGIN, Vec::new(), &payload)
            .await?;

        let token = SessionToken::new(reply.access_token)
            .map_err(|err| Error::transport(format!("unusable login response: {err}")))?;
        Ok(SessionSnapshot::new(token, reply.actor))
    }

    /// Ask the server to send a password-reset email.
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<()> {
        self.client
            .post_unit(
                paths::REQUEST_PASSWORD_RESET,
                Vec::new(),
                &RequestResetPayload { email },
            )
            .await
    }

    /// Complete a password reset with the emailed token.
    pub async fn reset_password(&self, token: &str, password: &str) -> ApiResult<()> {
        self.client
            .post_unit(
                paths::RESET_PASSWORD,
                Vec::new(),
                &ResetPasswordPayload { token, password },
            )
            .await
    }

    /// Complete an admin invite with the emailed token.
    pub async fn accept_invite(&self, token: &str, password: &str) -> ApiResult<()> {
        self.client
            .post_unit(
                paths::ACCEPT_INVITE,
                Vec::new(),
                &AcceptInvitePayload { token, password },
            )
            .await
    }
}

#[async_trait]
impl LoginService for AuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionSnapshot, Error> {
        AuthApi::login(self, credentials).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        InMemorySessionStore, RecordingNavigator, RequestBody, StaticTransport,
    };
    use crate::domain::{ErrorCode, SessionContext};
    use rstest::rstest;
    use serde_json::json;

    fn auth_api(transport: Arc<StaticTransport>) -> AuthApi {
        let session = Arc::new(
            SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
                .expect("initialise session"),
        );
        let navigator = Arc::new(RecordingNavigator::new());
        AuthApi::new(Arc::new(ApiClient::new(transport, session, navigator)))
    }

    #[rstest]
    #[tokio::test]
    async fn login_pairs_the_token_with_the_actor() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "accessToken": "t1",
                "actor": { "type": "ADMIN", "id": 1, "email": "a@x.com", "role": "ADMIN" }
            }),
        );
        let api = auth_api(transport.clone());

        let credentials =
            LoginCredentials::try_from_parts("a@x.com", "pw").expect("credentials shape");
        let snapshot = api.login(&credentials).await.expect("login succeeds");
        assert_eq!(snapshot.token().as_str(), "t1");
        assert!(snapshot.actor().is_admin());

        let sent = transport.requests();
        assert_eq!(sent[0].path, paths::LOGIN);
        match &sent[0].body {
            RequestBody::Json(value) => {
                assert_eq!(value["email"], "a@x.com");
                assert_eq!(value["password"], "pw");
            }
            other => panic!("expected a JSON body, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn empty_tokens_in_the_reply_are_rejected() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "accessToken": "",
                "actor": { "type": "ADMIN", "id": 1, "email": "a@x.com", "role": "ADMIN" }
            }),
        );
        let api = auth_api(transport);

        let credentials =
            LoginCredentials::try_from_parts("a@x.com", "pw").expect("credentials shape");
        let err = api.login(&credentials).await.expect_err("unusable reply");
        assert_eq!(err.code(), ErrorCode::Transport);
    }

    #[rstest]
    #[tokio::test]
    async fn reset_endpoints_post_their_tokens() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(200, &json!({ "success": true }));
        transport.plan_json(200, &json!({ "success": true }));
        let api = auth_api(transport.clone());

        api.request_password_reset("a@x.com")
            .await
            .expect("request reset");
        api.reset_password("reset-token", "new-pw")
            .await
            .expect("reset");

        let sent = transport.requests();
        assert_eq!(sent[0].path, paths::REQUEST_PASSWORD_RESET);
        assert_eq!(sent[1].path, paths::RESET_PASSWORD);
    }
}
