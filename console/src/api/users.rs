//! Staff user management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::{PageEnvelope, PageRequest};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::ApiResult;

/// Activation state of a staff user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Able to log in and own deals.
    Active,
    /// Deactivated; kept for history.
    Inactive,
}

/// One staff user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Owning department, e.g. `SALES` or `PRE_SALES`.
    pub department: String,
    /// Yearly sales target.
    pub yearly_target: f64,
    /// Fixed auth role tag for staff.
    pub auth_role: String,
    /// Activation state.
    pub status: UserStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Full name, as used for rep filters.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating a staff user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Owning department.
    pub department: String,
    /// Yearly sales target.
    pub yearly_target: f64,
}

/// Partial update payload; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New login email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New yearly target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_target: Option<f64>,
    /// New activation state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

/// Optional filters for the users list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    /// Restrict to one department.
    pub department: Option<String>,
    /// Restrict to one activation state.
    pub status: Option<UserStatus>,
}

/// Users endpoint client.
pub struct UsersApi {
    client: Arc<ApiClient>,
}

impl UsersApi {
    /// Wire the users client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List staff users matching the filter, one page at a time.
    pub async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> ApiResult<PageEnvelope<UserRecord>> {
        let mut query = Vec::new();
        if let Some(department) = &filter.department {
            query.push(("department".to_owned(), department.clone()));
        }
        if let Some(status) = filter.status {
            let tag = match status {
                UserStatus::Active => "ACTIVE",
                UserStatus::Inactive => "INACTIVE",
            };
            query.push(("status".to_owned(), tag.to_owned()));
        }
        for (key, value) in page.query_pairs() {
            query.push((key.to_owned(), value));
        }
        self.client.get(paths::USERS, query).await
    }

    /// Fetch one staff user.
    pub async fn get(&self, id: i64) -> ApiResult<UserRecord> {
        self.client.get(&paths::user(id), Vec::new()).await
    }

    /// Create a staff user.
    pub async fn create(&self, payload: &NewUser) -> ApiResult<UserRecord> {
        self.client.post(paths::USERS, Vec::new(), payload).await
    }

    /// Partially update a staff user.
    pub async fn update(&self, id: i64, payload: &UserUpdate) -> ApiResult<UserRecord> {
        self.client.patch(&paths::user(id), Vec::new(), payload).await
    }

    /// Deactivate a staff user.
    pub async fn deactivate(&self, id: i64) -> ApiResult<()> {
        self.client.delete_unit(&paths::user(id), Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::SessionContext;
    use crate::domain::ports::{
        InMemorySessionStore, Method, RecordingNavigator, StaticTransport,
    };
    use rstest::rstest;
    use serde_json::json;

    fn users_api(transport: Arc<StaticTransport>) -> UsersApi {
        let session = Arc::new(
            SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
                .expect("initialise session"),
        );
        UsersApi::new(Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(RecordingNavigator::new()),
        )))
    }

    fn user_json(id: i64, first: &str, last: &str) -> serde_json::Value {
        json!({
            "id": id,
            "firstName": first,
            "lastName": last,
            "email": "rep@ops360.example",
            "department": "SALES",
            "yearlyTarget": 120000000.0,
            "authRole": "USER",
            "status": "ACTIVE",
            "createdAt": "2025-01-06T08:00:00Z"
        })
    }

    #[rstest]
    #[tokio::test]
    async fn list_decodes_the_items_envelope() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "page": 1,
                "limit": 15,
                "total": 1,
                "totalPages": 1,
                "items": [user_json(7, "Ben", "Okafor")]
            }),
        );
        let api = users_api(transport.clone());

        let filter = UserFilter {
            department: Some("SALES".to_owned()),
            status: Some(UserStatus::Active),
        };
        let page = PageRequest::first(15).expect("valid page");
        let envelope = api.list(&filter, page).await.expect("list decodes");
        assert_eq!(envelope.items[0].full_name(), "Ben Okafor");

        let query = &transport.requests()[0].query;
        assert!(query.contains(&("department".to_owned(), "SALES".to_owned())));
        assert!(query.contains(&("status".to_owned(), "ACTIVE".to_owned())));
    }

    #[rstest]
    #[tokio::test]
    async fn deactivate_issues_a_delete_on_the_user_path() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(200, &json!({ "success": true }));
        let api = users_api(transport.clone());

        api.deactivate(7).await.expect("deactivate succeeds");

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].path, "/users/7");
    }

    #[rstest]
    fn partial_updates_serialise_only_the_set_fields() {
        let payload = UserUpdate {
            yearly_target: Some(90_000_000.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).expect("payload encodes");
        assert_eq!(value, json!({ "yearlyTarget": 90000000.0 }));
    }
}
