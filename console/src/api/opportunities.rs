//! Opportunity (deal) listing and editing.
//!
//! Deals are addressed by their external deal id — the spreadsheet-facing
//! identifier — not the internal row id.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use pagination::{PageEnvelope, PageRequest};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::api::pipeline::PipelineFilter;
use crate::domain::ApiResult;

/// A user reference on a deal (sales or pre-sales owner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRef {
    /// Staff user id.
    pub id: i64,
    /// Staff user full name.
    pub name: String,
}

/// The stage a deal currently displays in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealStageRef {
    /// Stage row id.
    pub id: i64,
    /// Stage name.
    pub name: String,
    /// Win probability in percent.
    pub probability: f64,
}

/// One opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    /// Server-assigned identifier.
    pub id: i64,
    /// Spreadsheet-facing deal identifier.
    pub external_deal_id: String,
    /// Deal name.
    pub deal_name: String,
    /// Customer the deal belongs to.
    pub customer_name: String,
    /// Deal value.
    pub amount: f64,
    /// Current stage, when assigned.
    #[serde(default, rename = "displayStage")]
    pub display_stage: Option<DealStageRef>,
    /// Pipeline year.
    pub year: i32,
    /// Quarter within the year, when assigned.
    #[serde(default)]
    pub quarter: Option<u8>,
    /// Sales owner, when assigned.
    #[serde(default)]
    pub sales_owner: Option<OwnerRef>,
    /// Pre-sales owners.
    #[serde(default)]
    pub pre_sales_owners: Vec<OwnerRef>,
    /// Expected close date, when set.
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for a deal.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityPayload {
    /// Deal name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_name: Option<String>,
    /// Customer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Deal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Stage row id; explicit `null` clears the stage.
    pub stage_id: Option<i64>,
    /// Pipeline year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Quarter within the year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    /// Sales owner id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_owner_id: Option<i64>,
    /// Pre-sales owner ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pre_sales_owner_ids: Vec<i64>,
    /// Expected close date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
}

/// Opportunities endpoint client.
pub struct OpportunitiesApi {
    client: Arc<ApiClient>,
}

impl OpportunitiesApi {
    /// Wire the opportunities client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List deals matching the filter, one page at a time.
    pub async fn list(
        &self,
        filter: &PipelineFilter,
        page: PageRequest,
    ) -> ApiResult<PageEnvelope<Opportunity>> {
        let mut query = filter.query_pairs();
        for (key, value) in page.query_pairs() {
            query.push((key.to_owned(), value));
        }
        self.client.get(paths::PIPELINE_DEALS, query).await
    }

    /// Fetch one deal.
    pub async fn get(&self, external_deal_id: &str) -> ApiResult<Opportunity> {
        self.client
            .get(&paths::pipeline_deal(external_deal_id), Vec::new())
            .await
    }

    /// Create a deal.
    pub async fn create(&self, payload: &OpportunityPayload) -> ApiResult<Opportunity> {
        self.client
            .post(paths::PIPELINE_DEALS, Vec::new(), payload)
            .await
    }

    /// Partially update a deal.
    pub async fn update(
        &self,
        external_deal_id: &str,
        payload: &OpportunityPayload,
    ) -> ApiResult<Opportunity> {
        self.client
            .patch(&paths::pipeline_deal(external_deal_id), Vec::new(), payload)
            .await
    }

    /// Delete a deal.
    pub async fn delete(&self, external_deal_id: &str) -> ApiResult<()> {
        self.client
            .delete_unit(&paths::pipeline_deal(external_deal_id), Vec::new())
            .await
    }
}
