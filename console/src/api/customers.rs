//! Customer directory and contact management.
//!
//! The customer list is the one endpoint that keys its records by resource
//! name (`customers`) instead of `items`; the shared envelope accepts both,
//! so nothing here needs to care.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagination::{PageEnvelope, PageRequest};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::ApiResult;

/// A named contact at a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    /// Server-assigned identifier.
    pub id: i64,
    /// Contact name, when known.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email, when known.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact mobile number, when known.
    #[serde(default)]
    pub mobile: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One customer with its aggregate deal figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Server-assigned identifier.
    pub id: i64,
    /// Customer name.
    pub name: String,
    /// Known contacts, primary first.
    #[serde(default)]
    pub contacts: Vec<CustomerContact>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp.
    pub updated_at: DateTime<Utc>,
    /// Deals attached to this customer.
    pub deal_count: u64,
    /// Combined value of those deals.
    pub total_deal_size: f64,
}

/// Single-item envelope used by the customer detail endpoint.
#[derive(Debug, Clone, Deserialize)]
struct ItemEnvelope<T> {
    item: T,
}

/// Payload for creating or renaming a customer.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerPayload {
    /// Customer name.
    pub name: String,
}

/// Payload for creating or editing a contact.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    /// Contact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact mobile number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

/// Customers endpoint client.
pub struct CustomersApi {
    client: Arc<ApiClient>,
}

impl CustomersApi {
    /// Wire the customers client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List customers, one page at a time.
    pub async fn list(&self, page: PageRequest) -> ApiResult<PageEnvelope<Customer>> {
        let query = page
            .query_pairs()
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect();
        self.client.get(paths::CUSTOMERS, query).await
    }

    /// Fetch one customer with its contacts.
    pub async fn get(&self, id: i64) -> ApiResult<Customer> {
        let envelope: ItemEnvelope<Customer> =
            self.client.get(&paths::customer(id), Vec::new()).await?;
        Ok(envelope.item)
    }

    /// Create a customer.
    pub async fn create(&self, payload: &CustomerPayload) -> ApiResult<Customer> {
        self.client.post(paths::CUSTOMERS, Vec::new(), payload).await
    }

    /// Rename a customer.
    pub async fn update(&self, id: i64, payload: &CustomerPayload) -> ApiResult<Customer> {
        self.client
            .patch(&paths::customer(id), Vec::new(), payload)
            .await
    }

    /// Add a contact to a customer.
    pub async fn add_contact(
        &self,
        customer_id: i64,
        payload: &ContactPayload,
    ) -> ApiResult<CustomerContact> {
        self.client
            .post(&paths::customer_contacts(customer_id), Vec::new(), payload)
            .await
    }

    /// Edit one contact of a customer.
    pub async fn update_contact(
        &self,
        customer_id: i64,
        contact_id: i64,
        payload: &ContactPayload,
    ) -> ApiResult<CustomerContact> {
        self.client
            .patch(
                &paths::customer_contact(customer_id, contact_id),
                Vec::new(),
                payload,
            )
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

    fn customers_api(transport: Arc<StaticTransport>) -> CustomersApi {
        let session = Arc::new(
            SessionContext::initialise(Arc::new(InMemorySessionStore::new()))
                .expect("initialise session"),
        );
        CustomersApi::new(Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(RecordingNavigator::new()),
        )))
    }

    fn customer_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "contacts": [],
            "createdAt": "2025-02-10T10:00:00Z",
            "updatedAt": "2025-06-01T10:00:00Z",
            "dealCount": 3,
            "totalDealSize": 5400000.0
        })
    }

    #[rstest]
    #[tokio::test]
    async fn list_decodes_the_resource_named_envelope_key() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "success": true,
                "page": 1,
                "limit": 15,
                "total": 1,
                "totalPages": 1,
                "customers": [customer_json(4, "Acme")]
            }),
        );
        let api = customers_api(transport);

        let page = PageRequest::first(15).expect("valid page");
        let envelope = api.list(page).await.expect("legacy key decodes");
        assert_eq!(envelope.items[0].name, "Acme");
    }

    #[rstest]
    #[tokio::test]
    async fn detail_unwraps_the_item_envelope() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(200, &json!({ "success": true, "item": customer_json(4, "Acme") }));
        let api = customers_api(transport.clone());

        let customer = api.get(4).await.expect("detail decodes");
        assert_eq!(customer.deal_count, 3);
        assert_eq!(transport.requests()[0].path, "/customers/4");
    }

    #[rstest]
    #[tokio::test]
    async fn contact_edits_target_the_nested_path() {
        let transport = Arc::new(StaticTransport::new());
        transport.plan_json(
            200,
            &json!({
                "id": 9,
                "name": "New Name",
                "createdAt": "2025-02-10T10:00:00Z",
                "updatedAt": "2025-06-01T10:00:00Z"
            }),
        );
        let api = customers_api(transport.clone());

        let payload = ContactPayload {
            name: Some("New Name".to_owned()),
            ..Default::default()
        };
        let contact = api
            .update_contact(4, 9, &payload)
            .await
            .expect("contact decodes");
        assert_eq!(contact.name.as_deref(), Some("New Name"));
        assert_eq!(transport.requests()[0].path, "/customers/4/contacts/9");
    }
}
