//! Audit trail reads.
//!
//! Audit entries embed a denormalised snapshot of the acting identity taken
//! at write time — older entries may lack it entirely, and staff actors
//! carry a flattened `name` rather than split name fields, so the shape is
//! deliberately separate from the live session actor.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::{PageEnvelope, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::{AdminRole, ApiResult};

/// Actor kind tag on an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorType {
    /// A sales staff user.
    User,
    /// A back-office admin.
    Admin,
}

impl ActorType {
    /// Wire spelling of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

/// Identity snapshot embedded in an audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditActor {
    /// Staff user snapshot.
    User {
        /// Staff user id at write time.
        id: i64,
        /// Full name at write time.
        name: String,
        /// Email at write time.
        email: String,
        /// Department at write time.
        department: String,
    },
    /// Admin snapshot.
    Admin {
        /// Admin id at write time.
        id: i64,
        /// Email at write time.
        email: String,
        /// Role at write time.
        role: AdminRole,
    },
}

/// One audit trail entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    /// Server-assigned identifier.
    pub id: i64,
    /// Actor kind tag.
    pub actor_type: ActorType,
    /// Acting identity's id.
    pub actor_id: i64,
    /// Identity snapshot; absent on old entries.
    #[serde(default)]
    pub actor: Option<AuditActor>,
    /// Action verb, e.g. `CREATE`.
    pub action: String,
    /// Entity kind acted on, when recorded.
    #[serde(default)]
    pub entity: Option<String>,
    /// Entity id acted on, when recorded.
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// Human-readable description.
    pub description: String,
    /// Free-form structured context.
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Request origin address, when captured.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Request user agent, when captured.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Write timestamp.
    pub created_at: DateTime<Utc>,
}

/// Optional filters for the audit list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFilter {
    /// Restrict to one actor kind.
    pub actor_type: Option<ActorType>,
    /// Restrict to one action verb.
    pub action: Option<String>,
    /// Restrict to one entity kind.
    pub entity: Option<String>,
}

/// Audit log endpoint client.
pub struct AuditLogsApi {
    client: Arc<ApiClient>,
}

impl AuditLogsApi {
    /// Wire the audit client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List audit entries matching the filter, one page at a time.
    pub async fn list(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> ApiResult<PageEnvelope<AuditLog>> {
        let mut query = Vec::new();
        if let Some(actor_type) = filter.actor_type {
            query.push(("actorType".to_owned(), actor_type.as_str().to_owned()));
        }
        if let Some(action) = &filter.action {
            query.push(("action".to_owned(), action.clone()));
        }
        if let Some(entity) = &filter.entity {
            query.push(("entity".to_owned(), entity.clone()));
        }
        for (key, value) in page.query_pairs() {
            query.push((key.to_owned(), value));
        }
        self.client.get(paths::AUDIT_LOGS, query).await
    }

    /// Fetch one audit entry.
    pub async fn get(&self, id: i64) -> ApiResult<AuditLog> {
        self.client.get(&paths::audit_log(id), Vec::new()).await
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

    fn audit_api(transport: Arc<StaticTransport>) -> AuditLogsApi {
        let session = Arc::new(
            SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
                .expect("initialise session"),
        );
        AuditLogsApi::new(Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(RecordingNavigator::new()),
        )))
    }

    #[rstest]
    #[tokio::test]
    async fn entries_decode_with_and_without_the_actor_snapshot() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "success": true,
                "page": 1,
                "limit": 15,
                "total": 2,
                "totalPages": 1,
                "items": [
                    {
                        "id": 51,
                        "actorType": "ADMIN",
                        "actorId": 1,
                        "actor": { "type": "ADMIN", "id": 1, "email": "root@ops360.example", "role": "SUPER_ADMIN" },
                        "action": "DELETE",
                        "entity": "User",
                        "entityId": 9,
                        "description": "Deactivated user 9",
                        "ipAddress": "10.0.0.4",
                        "createdAt": "2025-06-20T12:00:00Z"
                    },
                    {
                        "id": 12,
                        "actorType": "USER",
                        "actorId": 7,
                        "action": "UPLOAD",
                        "description": "Uploaded weekly report",
                        "createdAt": "2025-03-02T09:30:00Z"
                    }
                ]
            }),
        );
        let api = audit_api(transport);

        let page = PageRequest::first(15).expect("valid page");
        let envelope = api
            .list(&AuditFilter::default(), page)
            .await
            .expect("entries decode");
        assert!(matches!(
            envelope.items[0].actor,
            Some(AuditActor::Admin { role: AdminRole::SuperAdmin, .. }),
        ));
        assert_eq!(envelope.items[1].actor, None);
        assert_eq!(envelope.items[1].entity, None);
    }

    #[rstest]
    #[tokio::test]
    async fn filters_ride_the_query_string() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "page": 1, "limit": 15, "total": 0, "totalPages": 1, "items": []
            }),
        );
        let api = audit_api(transport.clone());

        let filter = AuditFilter {
            actor_type: Some(ActorType::Admin),
            action: Some("DELETE".to_owned()),
            entity: None,
        };
        let page = PageRequest::first(15).expect("valid page");
        api.list(&filter, page).await.expect("list succeeds");

        let query = &transport.requests()[0].query;
        assert!(query.contains(&("actorType".to_owned(), "ADMIN".to_owned())));
        assert!(query.contains(&("action".to_owned(), "DELETE".to_owned())));
    }
}
