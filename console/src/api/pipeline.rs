//! Pipeline overview: stage totals, summary block, stage reference data,
//! and the pipeline spreadsheet upload.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::ports::FileUpload;
use crate::domain::{ApiResult, PipelineSummary, RawStageTotals};

/// A deal stage with its win probability, from the reference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealStage {
    /// Server-assigned identifier.
    pub id: i64,
    /// Stage name.
    pub name: String,
    /// Win probability in percent.
    pub probability: f64,
}

/// Stage-keyed totals plus the year summary, as the overview endpoint
/// returns them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOverview {
    /// Server-side success flag.
    #[serde(default)]
    pub success: bool,
    /// Deals counted into the overview.
    pub total: u64,
    /// Totals keyed by canonical stage key; stages may be missing.
    pub stage_totals: HashMap<String, RawStageTotals>,
    /// Year-level summary block.
    pub summary: PipelineSummary,
}

/// Filters applied to the pipeline overview and the deal list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineFilter {
    /// Pipeline year, e.g. 2025.
    pub year: Option<i32>,
    /// Restrict to one quarter.
    pub quarter: Option<u8>,
    /// Restrict to one sales owner.
    pub sales_owner_id: Option<i64>,
    /// Restrict to deals with any of these pre-sales owners.
    pub pre_sales_owner_ids: Vec<i64>,
    /// Restrict to one stage.
    pub stage_id: Option<i64>,
}

impl PipelineFilter {
    /// Query-string pairs for the wire request.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(year) = self.year {
            pairs.push(("year".to_owned(), year.to_string()));
        }
        if let Some(quarter) = self.quarter {
            pairs.push(("quarter".to_owned(), quarter.to_string()));
        }
        if let Some(owner) = self.sales_owner_id {
            pairs.push(("salesOwnerId".to_owned(), owner.to_string()));
        }
        for owner in &self.pre_sales_owner_ids {
            pairs.push(("preSalesOwnerIds".to_owned(), owner.to_string()));
        }
        if let Some(stage) = self.stage_id {
            pairs.push(("stageId".to_owned(), stage.to_string()));
        }
        pairs
    }
}

/// Pipeline endpoint client.
pub struct PipelineApi {
    client: Arc<ApiClient>,
}

impl PipelineApi {
    /// Wire the pipeline client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the funnel overview for the filtered slice.
    pub async fn overview(&self, filter: &PipelineFilter) -> ApiResult<PipelineOverview> {
        self.client
            .get(paths::PIPELINE, filter.query_pairs())
            .await
    }

    /// Deal stage reference data.
    pub async fn stages(&self) -> ApiResult<Vec<DealStage>> {
        self.client.get(paths::PIPELINE_STAGES, Vec::new()).await
    }

    /// Upload a pipeline spreadsheet for one year, optionally attributed
    /// to one sales owner.
    pub async fn upload(
        &self,
        year: i32,
        sales_owner_id: Option<i64>,
        file: FileUpload,
    ) -> ApiResult<()> {
        let mut query = vec![("year".to_owned(), year.to_string())];
        if let Some(owner) = sales_owner_id {
            query.push(("salesOwnerId".to_owned(), owner.to_string()));
        }
        self.client
            .upload_unit(paths::UPLOAD_PIPELINE, query, file)
            .await
    }
}
