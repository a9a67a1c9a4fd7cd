//! Admin management: listing and the invite flow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::{PageEnvelope, PageRequest};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::{AdminRole, ApiResult};

/// Activation state of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminStatus {
    /// Able to log in.
    Active,
    /// Invited or deactivated.
    Inactive,
}

/// One admin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Admin role.
    pub role: AdminRole,
    /// Activation state.
    pub status: AdminStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct InvitePayload<'a> {
    email: &'a str,
}

/// Admins endpoint client.
pub struct AdminsApi {
    client: Arc<ApiClient>,
}

impl AdminsApi {
    /// Wire the admins client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List admin accounts, one page at a time.
    pub async fn list(&self, page: PageRequest) -> ApiResult<PageEnvelope<AdminRecord>> {
        let query = page
            .query_pairs()
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect();
        self.client.get(paths::ADMINS, query).await
    }

    /// Invite a new admin by email.
    pub async fn invite(&self, email: &str) -> ApiResult<()> {
        self.client
            .post_unit(paths::ADMINS_INVITE, Vec::new(), &InvitePayload { email })
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::SessionContext;
    use crate::domain::ports::{InMemorySessionStore, RecordingNavigator, StaticTransport};
    use rstest::rstest;
    use serde_json::json;

    fn admins_api(transport: Arc<StaticTransport>) -> AdminsApi {
        let session = Arc::new(
            SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
                .expect("initialise session"),
        );
        AdminsApi::new(Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(RecordingNavigator::new()),
        )))
    }

    #[rstest]
    #[tokio::test]
    async fn admins_decode_with_role_and_status() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "page": 1,
                "limit": 15,
                "total": 2,
                "totalPages": 1,
                "items": [
                    {
                        "id": 1,
                        "email": "root@ops360.example",
                        "role": "SUPER_ADMIN",
                        "status": "ACTIVE",
                        "createdAt": "2024-11-01T08:00:00Z"
                    },
                    {
                        "id": 2,
                        "email": "ops@ops360.example",
                        "role": "ADMIN",
                        "status": "INACTIVE",
                        "createdAt": "2025-06-01T08:00:00Z"
                    }
                ]
            }),
        );
        let api = admins_api(transport);

        let page = PageRequest::first(15).expect("valid page");
        let envelope = api.list(page).await.expect("admins decode");
        assert_eq!(envelope.items[0].role, AdminRole::SuperAdmin);
        assert_eq!(envelope.items[1].status, AdminStatus::Inactive);
    }

    #[rstest]
    #[tokio::test]
    async fn invite_posts_the_email() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(200, &json!({ "success": true }));
        let api = admins_api(transport.clone());

        api.invite("new@ops360.example").await.expect("invite succeeds");
        assert_eq!(transport.requests()[0].path, paths::ADMINS_INVITE);
    }
}
