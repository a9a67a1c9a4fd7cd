//! KPI dashboard data: per-rep weekly quality snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::paths;
use crate::domain::ApiResult;

/// A report-quality finding applying to the whole week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyFinding {
    /// Raw status tag; normalise before rendering.
    pub status: String,
    /// Finding text.
    pub message: String,
}

/// A finding pinned to one meeting row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingFinding {
    /// Meeting the finding refers to.
    pub meeting_id: i64,
    /// Customer of that meeting.
    pub customer_name: String,
    /// Primary contact of that meeting.
    pub primary_contact: String,
    /// Stated purpose.
    pub meeting_purpose: String,
    /// Recorded outcome.
    pub meeting_outcome: String,
    /// Raw status tag; normalise before rendering.
    pub status: String,
    /// Finding text.
    pub message: String,
}

/// Aggregated counts behind the weekly findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingCounts {
    /// Meetings with no recorded outcome.
    #[serde(default)]
    pub missing_outcome_count: Option<u64>,
    /// Meetings with no named contact.
    #[serde(default)]
    pub missing_contact_count: Option<u64>,
    /// Meetings listing only a role, not a person.
    #[serde(default)]
    pub role_only_count: Option<u64>,
}

/// One rep's weekly KPI snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiWeeklySnapshot {
    /// Meetings counted into the score.
    pub total_meetings: u64,
    /// Quality score for the week.
    pub score: f64,
    /// Raw status tag; normalise before rendering.
    pub status: String,
    /// Week-level findings.
    #[serde(default)]
    pub weekly_findings: Vec<WeeklyFinding>,
    /// Aggregated counts, when the server provides them.
    #[serde(default)]
    pub counts: Option<FindingCounts>,
    /// Per-meeting findings.
    #[serde(default)]
    pub meeting_findings: Vec<MeetingFinding>,
}

/// Optional KPI query filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiFilter {
    /// Restrict to one month, e.g. `2025-06`.
    pub month: Option<String>,
    /// Restrict to one week within the month.
    pub week: Option<u8>,
    /// Restrict to one quarter.
    pub quarter: Option<u8>,
}

/// Collapse the server's free-form status tags onto the three the console
/// renders. Unknown tags pass through upper-cased.
pub fn normalize_status(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.as_str() {
        "" => "FAIR".to_owned(),
        "FAIL" | "POOR" => "FAIL".to_owned(),
        "GOOD" => "GOOD".to_owned(),
        "FAIR" => "FAIR".to_owned(),
        _ => upper,
    }
}

/// KPI endpoint client.
pub struct KpiApi {
    client: Arc<ApiClient>,
}

impl KpiApi {
    /// Wire the KPI client over the shared request client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch one rep's weekly snapshot.
    pub async fn weekly_snapshot(
        &self,
        rep_name: &str,
        filter: &KpiFilter,
    ) -> ApiResult<KpiWeeklySnapshot> {
        let mut query = Vec::new();
        if let Some(month) = &filter.month {
            query.push(("month".to_owned(), month.clone()));
        }
        if let Some(week) = filter.week {
            query.push(("week".to_owned(), week.to_string()));
        }
        if let Some(quarter) = filter.quarter {
            query.push(("quarter".to_owned(), quarter.to_string()));
        }
        self.client.get(&paths::kpi(rep_name), query).await
    }
}
